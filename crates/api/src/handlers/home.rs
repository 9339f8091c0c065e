//! Handlers for the home page singleton.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use studio_core::content::ContentKind;
use studio_core::featured::validate_featured;
use studio_db::models::home::UpdateHomePage;
use studio_db::repositories::HomePageRepo;
use studio_events::{ContentAction, ContentEvent};

use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/home
///
/// The singleton is created with empty translations on first read.
pub async fn get_home(
    _editor: RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let home = HomePageRepo::detail(&state.pool).await?;
    Ok(Json(DataResponse { data: home }))
}

/// PUT /api/v1/home
///
/// Replace the mask, background video, featured films (max 4), featured
/// press (max 6) and the hero texts.
pub async fn update_home(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<UpdateHomePage>,
) -> AppResult<impl IntoResponse> {
    validate_featured(&input.featured_film_ids, &input.featured_press_ids)?;
    let home = HomePageRepo::update(&state.pool, &input).await?;

    tracing::info!(
        featured_films = home.featured_film_ids.len(),
        featured_press = home.featured_press_ids.len(),
        user_id = user.user_id,
        "Home page updated"
    );
    state.event_bus.publish(
        ContentEvent::new(ContentKind::HomePage, ContentAction::Upserted).with_actor(user.user_id),
    );
    Ok(Json(DataResponse { data: home }))
}
