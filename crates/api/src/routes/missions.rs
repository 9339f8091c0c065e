use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::missions;
use crate::state::AppState;

/// Mission statement routes mounted at `/missions`.
///
/// ```text
/// GET    /             -> list_missions
/// POST   /             -> upsert_mission
/// PUT    /order        -> reorder_missions
/// GET    /{id}         -> get_mission
/// DELETE /{id}         -> delete_mission
/// PATCH  /{id}/title   -> update_mission_title
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(missions::list_missions).post(missions::upsert_mission),
        )
        .route("/order", put(missions::reorder_missions))
        .route(
            "/{id}",
            get(missions::get_mission).delete(missions::delete_mission),
        )
        .route("/{id}/title", patch(missions::update_mission_title))
}
