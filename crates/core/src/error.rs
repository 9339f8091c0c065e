//! The domain error every layer converts into.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `entity` is a display name such as `"Film"` or `"Media asset"`.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// The payload broke a content rule (slug, language keys, caps,
    /// duplicate ids). Raised before any write.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    /// No session, or a role without the needed capability.
    #[error("Not allowed: {0}")]
    Unauthorized(String),

    /// A CDN, text generation, image processing or screenshot call failed.
    #[error("External service failed: {0}")]
    UpstreamService(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
