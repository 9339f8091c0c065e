use studio_core::error::CoreError;

/// Errors from the external service clients.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    /// Credentials for the service are missing from the environment.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("{service} API error ({status}): {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The service answered 2xx but not in the expected shape.
    #[error("{service} returned an unexpected response: {detail}")]
    InvalidResponse {
        service: &'static str,
        detail: String,
    },
}

impl From<IntegrationError> for CoreError {
    fn from(err: IntegrationError) -> Self {
        CoreError::UpstreamService(err.to_string())
    }
}

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or [`IntegrationError::Api`] carrying the status
/// and body text on failure.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, IntegrationError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(IntegrationError::Api {
            service,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn not_configured_maps_to_upstream_service() {
        let core: CoreError = IntegrationError::NotConfigured("Background removal").into();
        assert_matches!(core, CoreError::UpstreamService(msg) if msg == "Background removal is not configured");
    }

    #[test]
    fn api_error_display() {
        let err = IntegrationError::Api {
            service: "Bunny Storage",
            status: 401,
            body: "denied".into(),
        };
        assert_eq!(err.to_string(), "Bunny Storage API error (401): denied");
    }
}
