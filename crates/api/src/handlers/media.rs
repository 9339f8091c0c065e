//! Handlers for the media library: registration, uploads, tagging,
//! background removal and orphan cleanup.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use studio_core::content::{ContentKind, MediaKind};
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_db::models::media::{MediaAsset, UpdateMediaDetails};
use studio_db::repositories::{HashtagRepo, MediaAssetRepo};
use studio_events::{ContentAction, ContentEvent};
use studio_integrations::storage::{sanitize_file_name, upload_key};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::query::{HashtagSearchParams, MediaListParams};
use crate::response::{created, DataResponse};
use crate::state::AppState;

/// Folder used when the upload form names none.
const DEFAULT_UPLOAD_FOLDER: &str = "uploads";

/// Storage folder for background-removed images.
const PROCESSED_FOLDER: &str = "processed";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /media`: register a file that already lives on
/// the CDN.
#[derive(Debug, Deserialize)]
pub struct RegisterMediaRequest {
    pub kind: MediaKind,
    pub url: String,
    pub alt: Option<String>,
}

/// Request body for `PUT /media/{id}/url`.
#[derive(Debug, Deserialize)]
pub struct UpdateUrlRequest {
    pub url: String,
}

/// Request body for `PUT /media/{id}/hashtags`.
#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub hashtags: Vec<String>,
}

struct UploadedFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MediaAsset",
        id,
    })
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {err}"))
}

fn require_url(url: &str) -> AppResult<&str> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "URL must not be empty".into(),
        )));
    }
    Ok(url)
}

fn publish_media_change(state: &AppState, user: &AuthUser, id: DbId) {
    state.event_bus.publish(
        ContentEvent::new(ContentKind::MediaAsset, ContentAction::Upserted)
            .with_entity(id)
            .with_actor(user.user_id),
    );
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// GET /api/v1/media?kind=IMAGE|VIDEO
pub async fn list_media(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<MediaListParams>,
) -> AppResult<impl IntoResponse> {
    let assets = MediaAssetRepo::list_with_hashtags(&state.pool, params.kind).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// GET /api/v1/media/{id}
pub async fn get_media(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = MediaAssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: asset }))
}

/// POST /api/v1/media
pub async fn register_media(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<RegisterMediaRequest>,
) -> AppResult<impl IntoResponse> {
    let url = require_url(&input.url)?;
    let asset = MediaAssetRepo::register(&state.pool, input.kind, url, input.alt.as_deref()).await?;
    publish_media_change(&state, &user, asset.id);
    Ok(created(asset))
}

/// POST /api/v1/media/upload
///
/// Multipart form with `file`, optional `kind` (`IMAGE` default) and
/// optional `folder` (`uploads` default). The file is stored under
/// `{folder}/{millis}_{sanitized name}` and registered with the sanitized
/// name as alt text.
pub async fn upload_media(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file: Option<UploadedFile> = None;
    let mut kind: Option<String> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?.to_vec();
                file = Some(UploadedFile {
                    name,
                    content_type,
                    bytes,
                });
            }
            Some("kind") => kind = Some(field.text().await.map_err(bad_multipart)?),
            Some("folder") => folder = Some(field.text().await.map_err(bad_multipart)?),
            _ => {}
        }
    }

    let file = file
        .filter(|f| !f.bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("No file provided".into()))?;
    let folder = folder
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string());
    if folder.split('/').any(|segment| segment == "..") {
        return Err(AppError::BadRequest("Invalid upload folder".into()));
    }
    let kind = MediaKind::from_form_value(kind.as_deref().map(str::trim));

    let key = upload_key(&folder, Utc::now().timestamp_millis(), &file.name);
    let size = file.bytes.len();
    let url = state
        .integrations
        .storage
        .put(&key, file.bytes, &file.content_type)
        .await?;
    let alt = sanitize_file_name(&file.name);
    let asset = MediaAssetRepo::register(&state.pool, kind, &url, Some(&alt)).await?;

    tracing::info!(asset_id = asset.id, key = %key, size, user_id = user.user_id, "File uploaded");
    publish_media_change(&state, &user, asset.id);
    Ok(created(asset))
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

/// PUT /api/v1/media/{id}/url
///
/// Point an asset at a new file. Its id, and therefore every gallery and
/// reference to it, is preserved.
pub async fn update_media_url(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUrlRequest>,
) -> AppResult<impl IntoResponse> {
    let url = require_url(&input.url)?;
    let asset = MediaAssetRepo::mutate_url(&state.pool, id, url).await?;
    publish_media_change(&state, &user, id);
    Ok(Json(DataResponse { data: asset }))
}

/// PUT /api/v1/media/{id}/hashtags
///
/// Replace the asset's hashtag set.
pub async fn tag_media(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TagRequest>,
) -> AppResult<impl IntoResponse> {
    let hashtags = MediaAssetRepo::tag(&state.pool, id, &input.hashtags).await?;
    publish_media_change(&state, &user, id);
    Ok(Json(DataResponse { data: hashtags }))
}

/// PATCH /api/v1/media/{id}
///
/// Update alt text and/or hashtags; omitted fields are left unchanged.
pub async fn update_media_details(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMediaDetails>,
) -> AppResult<impl IntoResponse> {
    let asset = MediaAssetRepo::update_details(&state.pool, id, &input).await?;
    publish_media_change(&state, &user, id);
    Ok(Json(DataResponse { data: asset }))
}

/// DELETE /api/v1/media/{id}
///
/// Explicit deletion. Gallery edges cascade and main-image or video
/// references are cleared.
pub async fn delete_media(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MediaAssetRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    state.event_bus.publish(
        ContentEvent::new(ContentKind::MediaAsset, ContentAction::Deleted)
            .with_entity(id)
            .with_actor(user.user_id),
    );
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/media/{id}/remove-background
///
/// Four sequential steps: background removal, download of the processed
/// PNG, upload to `processed/`, and an in-place URL swap on the asset. A
/// failure at any step leaves the asset untouched.
pub async fn remove_background(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset: MediaAsset = MediaAssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if asset.kind != MediaKind::Image.as_str() {
        return Err(AppError::Core(CoreError::Validation(
            "Background removal only applies to images".into(),
        )));
    }

    let processed_url = state
        .integrations
        .background
        .remove_background(&asset.url)
        .await?;
    let bytes = state.integrations.fetcher.fetch_bytes(&processed_url).await?;
    let path = format!(
        "{PROCESSED_FOLDER}/bg_removed_{id}_{}.png",
        Utc::now().timestamp_millis()
    );
    let url = state
        .integrations
        .storage
        .put(&path, bytes, "image/png")
        .await?;
    let asset = MediaAssetRepo::mutate_url(&state.pool, id, &url).await?;

    tracing::info!(asset_id = id, user_id = user.user_id, "Background removed");
    publish_media_change(&state, &user, id);
    Ok(Json(DataResponse { data: asset }))
}

// ---------------------------------------------------------------------------
// Orphans
// ---------------------------------------------------------------------------

/// GET /api/v1/media/orphans
pub async fn list_orphans(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let orphans = MediaAssetRepo::list_orphans(&state.pool).await?;
    Ok(Json(DataResponse { data: orphans }))
}

/// DELETE /api/v1/media/orphans
///
/// Delete every asset no content references. Returns the deleted rows so
/// the caller can clean up the CDN.
pub async fn purge_orphans(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let purged = MediaAssetRepo::purge_orphans(&state.pool).await?;
    tracing::info!(count = purged.len(), user_id = admin.user_id, "Orphaned media purged");
    if !purged.is_empty() {
        state.event_bus.publish(
            ContentEvent::new(ContentKind::MediaAsset, ContentAction::Deleted)
                .with_actor(admin.user_id),
        );
    }
    Ok(Json(DataResponse { data: purged }))
}

// ---------------------------------------------------------------------------
// Hashtags
// ---------------------------------------------------------------------------

/// GET /api/v1/hashtags?q=
///
/// Substring search (20 results) when `q` is given, otherwise the first 100
/// hashtags alphabetically.
pub async fn search_hashtags(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<HashtagSearchParams>,
) -> AppResult<impl IntoResponse> {
    let needle = params
        .q
        .as_deref()
        .map(str::trim)
        .map(|q| q.trim_start_matches('#'))
        .filter(|q| !q.is_empty());
    let hashtags = match needle {
        Some(needle) => HashtagRepo::search(&state.pool, needle).await?,
        None => HashtagRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: hashtags }))
}
