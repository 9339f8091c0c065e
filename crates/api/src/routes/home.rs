use axum::routing::get;
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// ```text
/// GET /  -> get_home
/// PUT /  -> update_home
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home::get_home).put(home::update_home))
}
