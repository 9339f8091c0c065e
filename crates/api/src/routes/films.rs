use axum::routing::{delete, get, patch, put};
use axum::Router;

use crate::handlers::films;
use crate::state::AppState;

/// Film routes mounted at `/films`.
///
/// ```text
/// GET    /                          -> list_films
/// POST   /                          -> upsert_film
/// PUT    /order                     -> reorder_films
/// GET    /{id}                      -> get_film
/// DELETE /{id}                      -> delete_film
/// PATCH  /{id}/title                -> update_film_title
/// DELETE /{id}/gallery/{asset_id}   -> unlink_gallery_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(films::list_films).post(films::upsert_film))
        .route("/order", put(films::reorder_films))
        .route("/{id}", get(films::get_film).delete(films::delete_film))
        .route("/{id}/title", patch(films::update_film_title))
        .route(
            "/{id}/gallery/{asset_id}",
            delete(films::unlink_gallery_asset),
        )
}
