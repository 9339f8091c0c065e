//! Read-only licence information for administrators.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::config::LicenseInfo;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LicenseResponse {
    pub product: &'static str,
    pub version: &'static str,
    #[serde(flatten)]
    pub license: LicenseInfo,
}

/// GET /api/v1/admin/license
pub async fn get_license(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: LicenseResponse {
            product: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            license: state.config.license.clone(),
        },
    }))
}
