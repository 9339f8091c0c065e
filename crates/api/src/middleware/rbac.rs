//! Capability extractors for dashboard routes.
//!
//! They run before the handler body, so a rejected request never touches
//! the database. A missing session and an insufficient role both reject
//! with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use studio_core::error::CoreError;
use studio_core::policy::{require_admin, require_content_editor, Session};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

type Check = for<'a> fn(Option<&'a Session>) -> Result<&'a Session, CoreError>;

/// Extract the caller and run `check` against their session.
async fn authorize(parts: &mut Parts, state: &AppState, check: Check) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    let session = user.session();
    if let Err(e) = check(Some(&session)) {
        tracing::warn!(user_id = user.user_id, role = %user.role, path = %parts.uri.path(), "Request rejected for role");
        return Err(e.into());
    }
    Ok(user)
}

/// `ADMIN` or `EDITOR`: the dashboard reads and every content, media and
/// AI write.
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, require_content_editor)
            .await
            .map(RequireEditor)
    }
}

/// `ADMIN` only: orphan purge and license info.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, require_admin).await.map(RequireAdmin)
    }
}
