use studio_core::error::CoreError;

/// Error returned by repository operations that validate input before
/// touching the database.
///
/// Plain reads and writes keep returning `sqlx::Error` directly.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    pub fn not_found(entity: &'static str, id: studio_core::types::DbId) -> Self {
        Self::Core(CoreError::NotFound { entity, id })
    }
}
