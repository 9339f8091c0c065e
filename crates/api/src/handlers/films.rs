//! Handlers for the `/films` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use studio_core::content::{ContentKind, OrderableKind};
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_db::models::film::{FilmDetail, UpsertFilm};
use studio_db::models::media::GalleryOwner;
use studio_db::repositories::{FilmRepo, MediaAssetRepo};
use studio_events::{ContentAction, ContentEvent};

use crate::error::{AppError, AppResult};
use crate::handlers::content::{self, ReorderRequest, UpdateTitleRequest};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

const KIND: OrderableKind = OrderableKind::Film;

async fn load_detail(state: &AppState, id: DbId) -> AppResult<FilmDetail> {
    FilmRepo::detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Film", id }))
}

/// GET /api/v1/films
pub async fn list_films(
    _editor: RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let films = FilmRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: films }))
}

/// GET /api/v1/films/{id}
pub async fn get_film(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let film = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: film }))
}

/// POST /api/v1/films
///
/// Create (`id` absent or `"new"`) or update a film with its translations
/// and gallery in one transaction.
pub async fn upsert_film(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<UpsertFilm>,
) -> AppResult<impl IntoResponse> {
    let id = FilmRepo::upsert(&state.pool, &input).await?;
    let film = load_detail(&state, id).await?;

    tracing::info!(film_id = id, user_id = user.user_id, "Film saved");
    state.event_bus.publish(
        ContentEvent::new(ContentKind::Film, ContentAction::Upserted)
            .with_entity(id)
            .with_slug(film.film.slug.clone())
            .with_actor(user.user_id),
    );
    Ok(Json(DataResponse { data: film }))
}

/// DELETE /api/v1/films/{id}
///
/// Translations and gallery edges cascade; the media assets remain.
pub async fn delete_film(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    content::delete(&state, &user, KIND, id).await
}

/// PUT /api/v1/films/order
pub async fn reorder_films(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    content::reorder(&state, &user, KIND, &input).await
}

/// PATCH /api/v1/films/{id}/title
pub async fn update_film_title(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTitleRequest>,
) -> AppResult<StatusCode> {
    content::update_title(&state, &user, KIND, id, &input).await
}

/// DELETE /api/v1/films/{id}/gallery/{asset_id}
///
/// Detach one asset from the film's gallery. Idempotent.
pub async fn unlink_gallery_asset(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path((id, asset_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = MediaAssetRepo::unlink(&state.pool, GalleryOwner::Film(id), asset_id).await?;
    if removed {
        state.event_bus.publish(
            ContentEvent::new(ContentKind::Film, ContentAction::Upserted)
                .with_entity(id)
                .with_actor(user.user_id),
        );
    }
    Ok(StatusCode::NO_CONTENT)
}
