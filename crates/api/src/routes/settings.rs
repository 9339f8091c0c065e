use axum::routing::put;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Reads go through `/public/settings`.
///
/// ```text
/// PUT /  -> update_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", put(settings::update_settings))
}
