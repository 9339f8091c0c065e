//! Handlers for the `/press` resource, including the screenshot workflow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use studio_core::content::{ContentKind, OrderableKind};
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_db::models::media::GalleryOwner;
use studio_db::models::press::{PressItemDetail, UpsertPressItem};
use studio_db::repositories::{MediaAssetRepo, PressRepo};
use studio_events::{ContentAction, ContentEvent};

use crate::error::{AppError, AppResult};
use crate::handlers::content::{self, ReorderRequest, UpdateTitleRequest};
use crate::middleware::rbac::RequireEditor;
use crate::response::{created, DataResponse};
use crate::state::AppState;

const KIND: OrderableKind = OrderableKind::PressItem;

/// Storage folder for captured article screenshots.
const SCREENSHOT_FOLDER: &str = "press-screenshots";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PressItem",
        id,
    })
}

async fn load_detail(state: &AppState, id: DbId) -> AppResult<PressItemDetail> {
    PressRepo::detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/press
pub async fn list_press(
    _editor: RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = PressRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/press/{id}
pub async fn get_press_item(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: load_detail(&state, id).await?,
    }))
}

/// POST /api/v1/press
///
/// Create or update a press item with translations, gallery and related
/// films. The slug is generated from the titles or outlet when omitted on
/// create.
pub async fn upsert_press_item(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<UpsertPressItem>,
) -> AppResult<impl IntoResponse> {
    let id = PressRepo::upsert(&state.pool, &input).await?;
    let item = load_detail(&state, id).await?;

    tracing::info!(press_item_id = id, user_id = user.user_id, "Press item saved");
    state.event_bus.publish(
        ContentEvent::new(ContentKind::PressItem, ContentAction::Upserted)
            .with_entity(id)
            .with_slug(item.item.slug.clone())
            .with_actor(user.user_id),
    );
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/press/{id}
pub async fn delete_press_item(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    content::delete(&state, &user, KIND, id).await
}

/// PUT /api/v1/press/order
pub async fn reorder_press(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    content::reorder(&state, &user, KIND, &input).await
}

/// PATCH /api/v1/press/{id}/title
pub async fn update_press_title(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTitleRequest>,
) -> AppResult<StatusCode> {
    content::update_title(&state, &user, KIND, id, &input).await
}

/// DELETE /api/v1/press/{id}/gallery/{asset_id}
pub async fn unlink_gallery_asset(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path((id, asset_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed =
        MediaAssetRepo::unlink(&state.pool, GalleryOwner::PressItem(id), asset_id).await?;
    if removed {
        state.event_bus.publish(
            ContentEvent::new(ContentKind::PressItem, ContentAction::Upserted)
                .with_entity(id)
                .with_actor(user.user_id),
        );
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/press/{id}/screenshot
///
/// Capture the article page, store the JPEG on the CDN, register it as an
/// image asset and make it the item's main image (also appended to the
/// gallery). Any failing step aborts the rest.
pub async fn capture_screenshot(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = PressRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let article_url = item
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Press item has no article URL to capture".into(),
            ))
        })?;

    let bytes = state.integrations.screenshots.capture(article_url).await?;
    let path = format!(
        "{SCREENSHOT_FOLDER}/{id}-{}.jpg",
        Utc::now().timestamp_millis()
    );
    let public_url = state
        .integrations
        .storage
        .put(&path, bytes, "image/jpeg")
        .await?;
    let asset = PressRepo::attach_screenshot(
        &state.pool,
        id,
        &public_url,
        &format!("Screenshot of {article_url}"),
    )
    .await?;

    tracing::info!(press_item_id = id, asset_id = asset.id, user_id = user.user_id, "Press screenshot captured");
    state.event_bus.publish(
        ContentEvent::new(ContentKind::PressItem, ContentAction::Upserted)
            .with_entity(id)
            .with_slug(item.slug.clone())
            .with_actor(user.user_id),
    );
    Ok(created(asset))
}
