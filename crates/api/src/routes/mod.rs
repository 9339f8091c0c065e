pub mod admin;
pub mod ai;
pub mod auth;
pub mod films;
pub mod health;
pub mod home;
pub mod media;
pub mod missions;
pub mod press;
pub mod public;
pub mod settings;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/me                                      current user (any role)
///
/// /films                                        list, upsert (editor)
/// /films/order                                  reorder (editor)
/// /films/{id}                                   get, delete (editor)
/// /films/{id}/title                             inline title edit (editor)
/// /films/{id}/gallery/{asset_id}                unlink (editor)
///
/// /press                                        list, upsert
/// /press/order                                  reorder
/// /press/{id}                                   get, delete
/// /press/{id}/title                             inline title edit
/// /press/{id}/gallery/{asset_id}                unlink
/// /press/{id}/screenshot                        capture article screenshot
///
/// /missions                                     list, upsert
/// /missions/order                               reorder
/// /missions/{id}                                get, delete
/// /missions/{id}/title                          inline title edit
///
/// /media                                        list, register
/// /media/upload                                 multipart upload
/// /media/orphans                                list, purge (admin)
/// /media/{id}                                   get, update details, delete
/// /media/{id}/url                               swap file in place
/// /media/{id}/hashtags                          replace hashtags
/// /media/{id}/remove-background                 background removal
/// /hashtags                                     search / list
///
/// /home                                         get, update (editor)
/// /settings                                     update (editor)
///
/// /ai/seo | /ai/phrases | /ai/press-content     editor assist
///
/// /admin/license                                licence info (admin)
///
/// /public/films | /public/films/{slug}          published content, ?lang=
/// /public/press | /public/missions
/// /public/home | /public/settings
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/films", films::router())
        .nest("/press", press::router())
        .nest("/missions", missions::router())
        .nest("/media", media::router())
        .route("/hashtags", get(handlers::media::search_hashtags))
        .nest("/home", home::router())
        .nest("/settings", settings::router())
        .nest("/ai", ai::router())
        .nest("/admin", admin::router())
        .nest("/public", public::router())
}
