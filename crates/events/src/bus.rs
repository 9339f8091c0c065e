//! Content-change events and the broadcast bus that carries them.
//!
//! The bus is shared as `Arc<InvalidationBus>`. Publishing never blocks and
//! never fails, since the write behind the event has already committed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studio_core::content::ContentKind;
use studio_core::types::DbId;
use tokio::sync::broadcast;

/// Placeholder in route patterns that stands for the entity's slug.
const SLUG_PLACEHOLDER: &str = "[slug]";

// ---------------------------------------------------------------------------
// ContentEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentAction {
    Upserted,
    Deleted,
    Reordered,
}

/// A committed content change and the public routes it makes stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEvent {
    pub kind: ContentKind,
    pub action: ContentAction,
    pub entity_id: Option<DbId>,
    /// Slug of the changed entity, when it has one.
    pub slug: Option<String>,
    /// Route patterns from [`ContentKind::invalidation_routes`].
    pub routes: Vec<String>,
    pub actor_user_id: Option<DbId>,
    pub timestamp: DateTime<Utc>,
}

impl ContentEvent {
    pub fn new(kind: ContentKind, action: ContentAction) -> Self {
        Self {
            kind,
            action,
            entity_id: None,
            slug: None,
            routes: kind
                .invalidation_routes()
                .iter()
                .map(|r| r.to_string())
                .collect(),
            actor_user_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_entity(mut self, id: DbId) -> Self {
        self.entity_id = Some(id);
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Concrete paths to revalidate. Patterns containing `[slug]` are
    /// expanded when the slug is known and kept verbatim otherwise, so the
    /// site can revalidate every page of that shape.
    pub fn paths(&self) -> Vec<String> {
        self.routes
            .iter()
            .map(|route| match &self.slug {
                Some(slug) if route.contains(SLUG_PLACEHOLDER) => {
                    route.replace(SLUG_PLACEHOLDER, slug)
                }
                _ => route.clone(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// InvalidationBus
// ---------------------------------------------------------------------------

/// Events buffered per subscriber before the slowest one starts lagging.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out of committed content changes to in-process subscribers.
pub struct InvalidationBus {
    sender: broadcast::Sender<ContentEvent>,
}

impl InvalidationBus {
    /// A subscriber more than `capacity` events behind loses the oldest ones
    /// and sees `RecvError::Lagged` on its next receive.
    pub fn new(capacity: usize) -> Self {
        Self {
            sender: broadcast::channel(capacity).0,
        }
    }

    /// Hand `event` to every subscriber. Returns how many received it; zero
    /// is normal when revalidation forwarding is disabled.
    pub fn publish(&self, event: ContentEvent) -> usize {
        tracing::debug!(
            kind = %event.kind,
            action = ?event.action,
            entity_id = ?event.entity_id,
            "Content event"
        );
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ContentEvent> {
        self.sender.subscribe()
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
