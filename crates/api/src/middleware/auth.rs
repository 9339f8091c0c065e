//! Session extraction from the `Authorization: Bearer` header.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use studio_core::error::CoreError;
use studio_core::policy::Session;
use studio_core::types::DbId;

use crate::auth::jwt::decode_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller of a dashboard request. Extracting it rejects anonymous
/// requests with 401 but does not check the role.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: String,
}

impl AuthUser {
    pub fn session(&self) -> Session {
        Session {
            user_id: self.user_id,
            role: self.role.clone(),
        }
    }
}

impl From<Session> for AuthUser {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.user_id,
            role: session.role,
        }
    }
}

/// The bearer token, if the header is present and uses that scheme. The
/// scheme name is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("No active session".into()))
        })?;
        let claims = decode_session_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;
        Ok(claims.session().into())
    }
}
