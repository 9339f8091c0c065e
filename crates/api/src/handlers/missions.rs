//! Handlers for the `/missions` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use studio_core::content::{ContentKind, OrderableKind};
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_db::models::mission::{MissionWithTranslations, UpsertMission};
use studio_db::repositories::MissionRepo;
use studio_events::{ContentAction, ContentEvent};

use crate::error::{AppError, AppResult};
use crate::handlers::content::{self, ReorderRequest, UpdateTitleRequest};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

const KIND: OrderableKind = OrderableKind::MissionStatement;

async fn load(state: &AppState, id: DbId) -> AppResult<MissionWithTranslations> {
    MissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MissionStatement",
            id,
        }))
}

/// GET /api/v1/missions
pub async fn list_missions(
    _editor: RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let missions = MissionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: missions }))
}

/// GET /api/v1/missions/{id}
pub async fn get_mission(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: load(&state, id).await?,
    }))
}

/// POST /api/v1/missions
pub async fn upsert_mission(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<UpsertMission>,
) -> AppResult<impl IntoResponse> {
    let id = MissionRepo::upsert(&state.pool, &input).await?;
    let mission = load(&state, id).await?;

    tracing::info!(mission_id = id, user_id = user.user_id, "Mission statement saved");
    state.event_bus.publish(
        ContentEvent::new(ContentKind::MissionStatement, ContentAction::Upserted)
            .with_entity(id)
            .with_slug(mission.mission.slug.clone())
            .with_actor(user.user_id),
    );
    Ok(Json(DataResponse { data: mission }))
}

/// DELETE /api/v1/missions/{id}
pub async fn delete_mission(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    content::delete(&state, &user, KIND, id).await
}

/// PUT /api/v1/missions/order
pub async fn reorder_missions(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    content::reorder(&state, &user, KIND, &input).await
}

/// PATCH /api/v1/missions/{id}/title
pub async fn update_mission_title(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTitleRequest>,
) -> AppResult<StatusCode> {
    content::update_title(&state, &user, KIND, id, &input).await
}
