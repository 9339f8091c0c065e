//! Dashboard login and the current-account lookup.
//!
//! Tokens are short-lived bearer JWTs with no refresh; the dashboard logs
//! in again when one expires.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::error::CoreError;
use studio_db::models::user::{SessionUser, User};
use studio_db::repositories::UserRepo;
use studio_db::DbPool;

use crate::auth::jwt::issue_session_token;
use crate::auth::password::{check_length, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    pub user: SessionUser,
}

/// Same answer for an unknown email and a wrong password.
fn rejected() -> AppError {
    CoreError::Unauthorized("Invalid email or password".into()).into()
}

/// Look up the account and check the password against its Argon2 hash.
async fn authenticate(pool: &DbPool, credentials: &Credentials) -> AppResult<User> {
    let email = credentials.email.trim();
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".into()));
    }
    check_length(&credentials.password).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let Some(user) = UserRepo::find_by_email(pool, email).await? else {
        tracing::debug!("Login for unknown email");
        return Err(rejected());
    };
    let matches = verify_password(&credentials.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Stored hash for user {}: {e}", user.id)))?;
    if !matches {
        tracing::warn!(user_id = user.id, "Wrong password");
        return Err(rejected());
    }
    Ok(user)
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<LoginResponse>> {
    let user = authenticate(&state.pool, &credentials).await?;
    let issued = issue_session_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Cannot sign session token: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "Signed in");
    Ok(Json(LoginResponse {
        access_token: issued.token,
        token_type: "Bearer",
        expires_in: issued.expires_in,
        user: user.into(),
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SessionUser>>> {
    // A valid token can outlive its account.
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Account no longer exists".into()))?;
    Ok(Json(DataResponse { data: user.into() }))
}
