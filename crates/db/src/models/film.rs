//! Film entity models and the film upsert payload.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::translation::Localized;
use studio_core::types::{Date, DbId, PayloadId, Timestamp};

use crate::models::media::MediaAsset;
use crate::models::TranslationMap;

/// A row from the `films` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Film {
    pub id: DbId,
    pub slug: String,
    pub published: bool,
    pub sort_order: i32,
    pub release_date: Option<Date>,
    pub hero_video_id: Option<DbId>,
    pub tags: Vec<String>,
    /// Ordered list of [`Credit`] objects.
    pub credits: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `film_translations` table.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct FilmTranslation {
    pub film_id: DbId,
    pub lang: String,
    pub title: String,
    pub logline: String,
    pub synopsis: String,
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: String,
}

impl Localized for FilmTranslation {
    fn lang(&self) -> &str {
        &self.lang
    }
}

/// One credit line, e.g. `{"role": "Director", "name": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub role: String,
    pub name: String,
}

/// Per-language fields accepted by the film upsert.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilmTranslationInput {
    pub title: String,
    pub logline: String,
    pub synopsis: String,
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: String,
}

/// Create-or-update payload for a film.
///
/// `id` absent or `"new"` creates. `gallery_ids`, when present, is the
/// complete desired gallery in display order. `tags`, `credits` and
/// `gallery_ids` left out of an update keep their stored values; on create
/// they start empty.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertFilm {
    pub id: Option<PayloadId>,
    pub slug: String,
    #[serde(default)]
    pub published: bool,
    pub release_date: Option<Date>,
    pub hero_video_id: Option<DbId>,
    pub tags: Option<Vec<String>>,
    pub credits: Option<Vec<Credit>>,
    #[serde(default)]
    pub translations: TranslationMap<FilmTranslationInput>,
    pub gallery_ids: Option<Vec<DbId>>,
}

/// A film with every stored translation.
#[derive(Debug, Clone, Serialize)]
pub struct FilmWithTranslations {
    #[serde(flatten)]
    pub film: Film,
    pub translations: Vec<FilmTranslation>,
}

/// Admin/public detail view: translations, ordered gallery, hero video.
#[derive(Debug, Clone, Serialize)]
pub struct FilmDetail {
    #[serde(flatten)]
    pub film: Film,
    pub translations: Vec<FilmTranslation>,
    pub gallery: Vec<MediaAsset>,
    pub hero_video: Option<MediaAsset>,
}
