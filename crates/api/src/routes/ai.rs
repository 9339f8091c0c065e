use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// ```text
/// POST /seo            -> generate_seo
/// POST /phrases        -> generate_phrases
/// POST /press-content  -> generate_press_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/seo", post(ai::generate_seo))
        .route("/phrases", post(ai::generate_phrases))
        .route("/press-content", post(ai::generate_press_content))
}
