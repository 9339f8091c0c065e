//! Site settings singleton.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// The `site_settings` singleton row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSettings {
    pub id: String,
    pub site_title: Option<String>,
    pub contact_email: Option<String>,
    pub social_instagram: Option<String>,
    pub social_vimeo: Option<String>,
    pub social_linkedin: Option<String>,
    pub social_facebook: Option<String>,
    pub homepage_hero_video_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSiteSettings {
    pub site_title: Option<String>,
    pub contact_email: Option<String>,
    pub social_instagram: Option<String>,
    pub social_vimeo: Option<String>,
    pub social_linkedin: Option<String>,
    pub social_facebook: Option<String>,
    pub homepage_hero_video_id: Option<DbId>,
}
