//! Operations shared by every orderable content kind: reorder, delete and
//! inline title edits. The per-kind handler modules delegate here.

use axum::http::StatusCode;
use serde::Deserialize;
use studio_core::content::OrderableKind;
use studio_core::error::CoreError;
use studio_core::types::DbId;
use studio_db::repositories::{ContentRepo, ReorderRepo};
use studio_events::{ContentAction, ContentEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /{kind}/order`: every id of the kind, in display
/// order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<DbId>,
}

/// Request body for `PATCH /{kind}/{id}/title`.
#[derive(Debug, Deserialize)]
pub struct UpdateTitleRequest {
    pub title: String,
}

pub(crate) async fn reorder(
    state: &AppState,
    user: &AuthUser,
    kind: OrderableKind,
    input: &ReorderRequest,
) -> AppResult<StatusCode> {
    ReorderRepo::reorder(&state.pool, kind, &input.ids).await?;

    tracing::info!(kind = %kind.content_kind(), count = input.ids.len(), user_id = user.user_id, "Content reordered");
    state.event_bus.publish(
        ContentEvent::new(kind.content_kind(), ContentAction::Reordered).with_actor(user.user_id),
    );
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete(
    state: &AppState,
    user: &AuthUser,
    kind: OrderableKind,
    id: DbId,
) -> AppResult<StatusCode> {
    let deleted = ContentRepo::delete(&state.pool, kind, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: kind.content_kind().entity_name(),
            id,
        }));
    }

    state.event_bus.publish(
        ContentEvent::new(kind.content_kind(), ContentAction::Deleted)
            .with_entity(id)
            .with_actor(user.user_id),
    );
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn update_title(
    state: &AppState,
    user: &AuthUser,
    kind: OrderableKind,
    id: DbId,
    input: &UpdateTitleRequest,
) -> AppResult<StatusCode> {
    ContentRepo::update_title(&state.pool, kind, id, &input.title).await?;

    state.event_bus.publish(
        ContentEvent::new(kind.content_kind(), ContentAction::Upserted)
            .with_entity(id)
            .with_actor(user.user_id),
    );
    Ok(StatusCode::NO_CONTENT)
}
