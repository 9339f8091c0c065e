use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Unauthenticated read routes mounted at `/public`.
///
/// ```text
/// GET /films           -> list_films
/// GET /films/{slug}    -> get_film
/// GET /press           -> list_press
/// GET /missions        -> list_missions
/// GET /home            -> get_home
/// GET /settings        -> get_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/films", get(public::list_films))
        .route("/films/{slug}", get(public::get_film))
        .route("/press", get(public::list_press))
        .route("/missions", get(public::list_missions))
        .route("/home", get(public::get_home))
        .route("/settings", get(public::get_settings))
}
