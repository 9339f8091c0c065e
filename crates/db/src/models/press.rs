//! Press item models and the press upsert payload.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::content::PressKind;
use studio_core::translation::Localized;
use studio_core::types::{Date, DbId, PayloadId, Timestamp};

use crate::models::media::MediaAsset;
use crate::models::TranslationMap;

/// A row from the `press_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PressItem {
    pub id: DbId,
    pub slug: String,
    /// `PUBLICATION`, `REVIEW`, `INTERVIEW` or `NEWS`.
    pub kind: String,
    pub outlet: String,
    pub url: Option<String>,
    pub published: bool,
    pub sort_order: i32,
    pub published_at: Option<Date>,
    pub image_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `press_item_translations` table.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct PressItemTranslation {
    pub press_item_id: DbId,
    pub lang: String,
    pub title: String,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: String,
}

impl Localized for PressItemTranslation {
    fn lang(&self) -> &str {
        &self.lang
    }
}

/// Per-language fields accepted by the press upsert.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PressTranslationInput {
    pub title: String,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: String,
}

/// Create-or-update payload for a press item.
///
/// `slug` may be omitted; it is then derived from the Greek title, the
/// English title or the outlet, in that order. `gallery_ids` and `film_ids`
/// left out of an update keep the stored relations.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPressItem {
    pub id: Option<PayloadId>,
    pub slug: Option<String>,
    pub kind: PressKind,
    #[serde(default)]
    pub outlet: String,
    pub url: Option<String>,
    #[serde(default)]
    pub published: bool,
    pub published_at: Option<Date>,
    pub image_id: Option<DbId>,
    #[serde(default)]
    pub translations: TranslationMap<PressTranslationInput>,
    pub gallery_ids: Option<Vec<DbId>>,
    pub film_ids: Option<Vec<DbId>>,
}

/// A press item with every stored translation.
#[derive(Debug, Clone, Serialize)]
pub struct PressItemWithTranslations {
    #[serde(flatten)]
    pub item: PressItem,
    pub translations: Vec<PressItemTranslation>,
}

/// Detail view: translations, main image, ordered gallery, related films.
#[derive(Debug, Clone, Serialize)]
pub struct PressItemDetail {
    #[serde(flatten)]
    pub item: PressItem,
    pub translations: Vec<PressItemTranslation>,
    pub image: Option<MediaAsset>,
    pub gallery: Vec<MediaAsset>,
    pub film_ids: Vec<DbId>,
}
