//! Handlers for the site settings singleton.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use studio_core::content::ContentKind;
use studio_db::models::settings::UpdateSiteSettings;
use studio_db::repositories::SiteSettingsRepo;
use studio_events::{ContentAction, ContentEvent};

use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/settings
///
/// Partial update: omitted fields keep their stored value.
pub async fn update_settings(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<UpdateSiteSettings>,
) -> AppResult<impl IntoResponse> {
    let settings = SiteSettingsRepo::update(&state.pool, &input).await?;

    tracing::info!(user_id = user.user_id, "Site settings updated");
    state.event_bus.publish(
        ContentEvent::new(ContentKind::SiteSettings, ContentAction::Upserted)
            .with_actor(user.user_id),
    );
    Ok(Json(DataResponse { data: settings }))
}
