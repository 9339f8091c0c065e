//! Shared query parameter types for API handlers.

use serde::Deserialize;
use studio_core::content::MediaKind;
use studio_core::locale::DEFAULT_LANGUAGE;

/// `?lang=` on public reads. Missing means the default language;
/// unsupported codes are passed through and fall back during resolution.
#[derive(Debug, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

impl LangParams {
    pub fn lang(&self) -> &str {
        self.lang
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}

/// `?kind=IMAGE|VIDEO` on the media library listing.
#[derive(Debug, Default, Deserialize)]
pub struct MediaListParams {
    pub kind: Option<MediaKind>,
}

/// `?q=` on the hashtag endpoint. Absent or blank lists the dictionary.
#[derive(Debug, Default, Deserialize)]
pub struct HashtagSearchParams {
    pub q: Option<String>,
}
