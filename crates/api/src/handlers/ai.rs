//! Editor-assist endpoints backed by the text generator.
//!
//! Nothing here writes to the database; the dashboard copies suggestions
//! into the form and saves through the normal upsert.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use studio_integrations::prompts::{self, PhraseKind};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SeoRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PhrasesRequest {
    pub content: String,
    #[serde(default = "default_phrase_kind")]
    pub kind: PhraseKind,
}

fn default_phrase_kind() -> PhraseKind {
    PhraseKind::Phrases
}

#[derive(Debug, Deserialize)]
pub struct PressContentRequest {
    pub url: String,
}

fn require_text<'a>(value: &'a str, field: &str) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value)
}

/// POST /api/v1/ai/seo
pub async fn generate_seo(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<SeoRequest>,
) -> AppResult<impl IntoResponse> {
    let content = require_text(&input.content, "content")?;
    let seo = prompts::generate_seo(state.integrations.text.as_ref(), content).await?;
    Ok(Json(DataResponse { data: seo }))
}

/// POST /api/v1/ai/phrases
pub async fn generate_phrases(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<PhrasesRequest>,
) -> AppResult<impl IntoResponse> {
    let content = require_text(&input.content, "content")?;
    let phrases =
        prompts::generate_phrases(state.integrations.text.as_ref(), input.kind, content).await?;
    Ok(Json(DataResponse { data: phrases }))
}

/// POST /api/v1/ai/press-content
///
/// Fetch the article, reduce it to text and draft bilingual press copy.
pub async fn generate_press_content(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<PressContentRequest>,
) -> AppResult<impl IntoResponse> {
    let url = require_text(&input.url, "url")?;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::BadRequest("url must be an http(s) URL".into()));
    }
    let draft = prompts::draft_press_content(
        state.integrations.fetcher.as_ref(),
        state.integrations.text.as_ref(),
        url,
    )
    .await?;
    tracing::info!(url, user_id = user.user_id, "Press content drafted");
    Ok(Json(DataResponse { data: draft }))
}
