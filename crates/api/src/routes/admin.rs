use axum::routing::get;
use axum::Router;

use crate::handlers::license;
use crate::state::AppState;

/// ```text
/// GET /license  -> get_license
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/license", get(license::get_license))
}
