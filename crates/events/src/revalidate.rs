//! Best-effort forwarding of stale routes to the public site.
//!
//! [`RevalidationForwarder`] subscribes to the
//! [`InvalidationBus`](crate::bus::InvalidationBus) and POSTs each event's
//! paths to a revalidation webhook. Failures are logged and dropped: a
//! stale page is preferable to a failed admin write, and the site's own
//! cache expiry eventually catches up.

use std::time::Duration;

use tokio::sync::broadcast;

use crate::bus::ContentEvent;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum RevalidationError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Revalidation hook returned HTTP {0}")]
    HttpStatus(u16),
}

/// Delivers [`ContentEvent`]s to the site's revalidation endpoint.
pub struct RevalidationForwarder {
    client: reqwest::Client,
    url: String,
}

impl RevalidationForwarder {
    pub fn new(url: impl Into<String>) -> Result<Self, RevalidationError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Run the forwarding loop until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<ContentEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.forward(&event).await {
                        tracing::warn!(
                            error = %e,
                            kind = %event.kind,
                            "Failed to forward revalidation request"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Revalidation forwarder lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Invalidation bus closed, forwarder shutting down");
                    break;
                }
            }
        }
    }

    /// POST one event's paths. Single attempt, no retry.
    pub async fn forward(&self, event: &ContentEvent) -> Result<(), RevalidationError> {
        let payload = Self::payload(event);
        let response = self.client.post(&self.url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(RevalidationError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(kind = %event.kind, "Revalidation forwarded");
        Ok(())
    }

    fn payload(event: &ContentEvent) -> serde_json::Value {
        serde_json::json!({
            "kind": event.kind,
            "action": event.action,
            "entity_id": event.entity_id,
            "paths": event.paths(),
            "timestamp": event.timestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use studio_core::content::ContentKind;

    use super::*;
    use crate::bus::{ContentAction, InvalidationBus};

    #[test]
    fn new_does_not_panic() {
        let _forwarder = RevalidationForwarder::new("http://localhost:3000/api/revalidate").unwrap();
    }

    #[test]
    fn error_display_http_status() {
        let err = RevalidationError::HttpStatus(502);
        assert_eq!(err.to_string(), "Revalidation hook returned HTTP 502");
    }

    #[test]
    fn payload_carries_expanded_paths() {
        let event = ContentEvent::new(ContentKind::Film, ContentAction::Upserted)
            .with_entity(3)
            .with_slug("dawn");
        let payload = RevalidationForwarder::payload(&event);
        assert_eq!(payload["kind"], "film");
        assert_eq!(payload["action"], "upserted");
        assert_eq!(payload["entity_id"], 3);
        let paths = payload["paths"].as_array().unwrap();
        assert!(paths.iter().any(|p| p == "/films/dawn"));
    }

    #[tokio::test]
    async fn run_exits_when_bus_dropped() {
        let bus = InvalidationBus::default();
        let rx = bus.subscribe();
        let forwarder = RevalidationForwarder::new("http://127.0.0.1:9/unreachable").unwrap();
        drop(bus);
        forwarder.run(rx).await;
    }
}
