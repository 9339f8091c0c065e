//! Home page singleton models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::translation::Localized;
use studio_core::types::{DbId, Timestamp};

use crate::models::TranslationMap;

/// The `home_pages` singleton row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HomePage {
    pub id: String,
    pub svg_mask_id: Option<DbId>,
    pub video_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct HomePageTranslation {
    pub lang: String,
    pub title: String,
    pub hero_text: String,
}

impl Localized for HomePageTranslation {
    fn lang(&self) -> &str {
        &self.lang
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HomeTranslationInput {
    pub title: String,
    pub hero_text: String,
}

/// Full replacement of the home page configuration.
///
/// Featured lists are ordered and capped (4 films, 6 press items).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHomePage {
    pub svg_mask_id: Option<DbId>,
    pub video_id: Option<DbId>,
    #[serde(default)]
    pub featured_film_ids: Vec<DbId>,
    #[serde(default)]
    pub featured_press_ids: Vec<DbId>,
    #[serde(default)]
    pub translations: TranslationMap<HomeTranslationInput>,
}

/// The home page with translations and featured ids in display order.
#[derive(Debug, Clone, Serialize)]
pub struct HomePageDetail {
    #[serde(flatten)]
    pub page: HomePage,
    pub translations: Vec<HomePageTranslation>,
    pub featured_film_ids: Vec<DbId>,
    pub featured_press_ids: Vec<DbId>,
}
