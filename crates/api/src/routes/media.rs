use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Largest accepted upload body.
const UPLOAD_LIMIT_BYTES: usize = 100 * 1024 * 1024;

/// Media library routes mounted at `/media`.
///
/// ```text
/// GET    /                          -> list_media
/// POST   /                          -> register_media
/// POST   /upload                    -> upload_media
/// GET    /orphans                   -> list_orphans (admin)
/// DELETE /orphans                   -> purge_orphans (admin)
/// GET    /{id}                      -> get_media
/// PATCH  /{id}                      -> update_media_details
/// DELETE /{id}                      -> delete_media
/// PUT    /{id}/url                  -> update_media_url
/// PUT    /{id}/hashtags             -> tag_media
/// POST   /{id}/remove-background    -> remove_background
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list_media).post(media::register_media))
        .route(
            "/upload",
            post(media::upload_media).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route(
            "/orphans",
            get(media::list_orphans).delete(media::purge_orphans),
        )
        .route(
            "/{id}",
            get(media::get_media)
                .patch(media::update_media_details)
                .delete(media::delete_media),
        )
        .route("/{id}/url", put(media::update_media_url))
        .route("/{id}/hashtags", put(media::tag_media))
        .route("/{id}/remove-background", post(media::remove_background))
}
