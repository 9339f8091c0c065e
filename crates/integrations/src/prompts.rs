//! Editor-assist prompts and typed parsing of their JSON answers.
//!
//! The model is told the length limits, but answers are still truncated
//! here so callers never receive an over-long meta field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use studio_core::seo::{truncate_chars, META_DESCRIPTION_MAX_CHARS, META_TITLE_MAX_CHARS};

use crate::error::IntegrationError;
use crate::fetch::Fetcher;
use crate::html::extract_text;
use crate::text::TextGenerator;

const SERVICE: &str = "Text generation";

const SEO_SYSTEM_PROMPT: &str = "You are an SEO expert. Generate a JSON object with keys: \
title (max 60 chars), description (max 160 chars), and keywords (comma separated string). \
Output ONLY JSON.";

const PHRASES_SYSTEM_PROMPT: &str = "You are a creative copywriter for a film production studio. \
Generate a JSON object with a single key 'phrases' holding an array of 5-8 short evocative \
phrases of 3-6 words each. Output ONLY JSON.";

const MOTTOS_SYSTEM_PROMPT: &str = "You are a creative copywriter for a film production studio. \
Generate a JSON object with a single key 'mottos' holding an array of 3-5 mottos of 5-10 words \
each. Output ONLY JSON.";

const PRESS_SYSTEM_PROMPT: &str = "You are an expert editor for a film production studio. \
Read the article text and produce a JSON object with this exact shape: \
{ el: { title, short, long }, en: { title, short, long }, outlet: string }. \
'el' is Greek, 'en' is English. 'short' is one sentence, 'long' is one paragraph, \
'outlet' is the publication name. Output ONLY JSON.";

/// Meta fields suggested for a piece of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoSuggestion {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
}

/// Which list to generate for a mission statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhraseKind {
    Phrases,
    Mottos,
}

impl PhraseKind {
    fn key(&self) -> &'static str {
        match self {
            PhraseKind::Phrases => "phrases",
            PhraseKind::Mottos => "mottos",
        }
    }

    fn system_prompt(&self) -> &'static str {
        match self {
            PhraseKind::Phrases => PHRASES_SYSTEM_PROMPT,
            PhraseKind::Mottos => MOTTOS_SYSTEM_PROMPT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressCopy {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub long: String,
}

/// Bilingual press copy drafted from an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressDraft {
    #[serde(default)]
    pub el: PressCopy,
    #[serde(default)]
    pub en: PressCopy,
    #[serde(default)]
    pub outlet: String,
}

fn user_prompt(what: &str, content: &str) -> String {
    format!("Generate {what} for the following content:\n\n{content}")
}

fn invalid(detail: impl Into<String>) -> IntegrationError {
    IntegrationError::InvalidResponse {
        service: SERVICE,
        detail: detail.into(),
    }
}

fn parse_seo(value: Value) -> Result<SeoSuggestion, IntegrationError> {
    let mut seo: SeoSuggestion =
        serde_json::from_value(value).map_err(|e| invalid(format!("bad SEO object: {e}")))?;
    seo.title = truncate_chars(seo.title.trim(), META_TITLE_MAX_CHARS);
    seo.description = truncate_chars(seo.description.trim(), META_DESCRIPTION_MAX_CHARS);
    seo.keywords = seo.keywords.trim().to_string();
    Ok(seo)
}

fn parse_phrases(kind: PhraseKind, value: &Value) -> Result<Vec<String>, IntegrationError> {
    let items = value
        .get(kind.key())
        .and_then(Value::as_array)
        .ok_or_else(|| invalid(format!("missing '{}' array", kind.key())))?;

    Ok(items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

fn parse_press_draft(value: Value) -> Result<PressDraft, IntegrationError> {
    serde_json::from_value(value).map_err(|e| invalid(format!("bad press object: {e}")))
}

/// Suggest `{title, description, keywords}` for `content`.
pub async fn generate_seo(
    generator: &dyn TextGenerator,
    content: &str,
) -> Result<SeoSuggestion, IntegrationError> {
    let value = generator
        .generate_json(SEO_SYSTEM_PROMPT, &user_prompt("SEO metadata", content))
        .await?;
    parse_seo(value)
}

/// Generate a list of phrases or mottos for `content`.
pub async fn generate_phrases(
    generator: &dyn TextGenerator,
    kind: PhraseKind,
    content: &str,
) -> Result<Vec<String>, IntegrationError> {
    let value = generator
        .generate_json(kind.system_prompt(), &user_prompt(kind.key(), content))
        .await?;
    parse_phrases(kind, &value)
}

/// Fetch the article at `url` and draft bilingual press copy from its text.
pub async fn draft_press_content(
    fetcher: &dyn Fetcher,
    generator: &dyn TextGenerator,
    url: &str,
) -> Result<PressDraft, IntegrationError> {
    let html = fetcher.fetch_text(url).await?;
    let text = extract_text(&html);
    if text.is_empty() {
        return Err(IntegrationError::InvalidResponse {
            service: "Remote fetch",
            detail: "page has no readable text".into(),
        });
    }

    let value = generator
        .generate_json(PRESS_SYSTEM_PROMPT, &format!("Analyze this content:\n\n{text}"))
        .await?;
    parse_press_draft(value)
}
