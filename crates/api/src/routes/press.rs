use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::handlers::press;
use crate::state::AppState;

/// Press routes mounted at `/press`.
///
/// ```text
/// GET    /                          -> list_press
/// POST   /                          -> upsert_press_item
/// PUT    /order                     -> reorder_press
/// GET    /{id}                      -> get_press_item
/// DELETE /{id}                      -> delete_press_item
/// PATCH  /{id}/title                -> update_press_title
/// DELETE /{id}/gallery/{asset_id}   -> unlink_gallery_asset
/// POST   /{id}/screenshot           -> capture_screenshot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(press::list_press).post(press::upsert_press_item))
        .route("/order", put(press::reorder_press))
        .route(
            "/{id}",
            get(press::get_press_item).delete(press::delete_press_item),
        )
        .route("/{id}/title", patch(press::update_press_title))
        .route(
            "/{id}/gallery/{asset_id}",
            delete(press::unlink_gallery_asset),
        )
        .route("/{id}/screenshot", post(press::capture_screenshot))
}
