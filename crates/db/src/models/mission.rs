//! Mission statement models and upsert payload.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::translation::Localized;
use studio_core::types::{Date, DbId, PayloadId, Timestamp};

use crate::models::TranslationMap;

/// A row from the `mission_statements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MissionStatement {
    pub id: DbId,
    pub slug: String,
    pub published: bool,
    pub sort_order: i32,
    pub published_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `mission_statement_translations` table.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct MissionTranslation {
    pub mission_statement_id: DbId,
    pub lang: String,
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub phrases: Vec<String>,
    pub mottos: Vec<String>,
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: String,
}

impl Localized for MissionTranslation {
    fn lang(&self) -> &str {
        &self.lang
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MissionTranslationInput {
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub phrases: Vec<String>,
    pub mottos: Vec<String>,
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertMission {
    pub id: Option<PayloadId>,
    pub slug: String,
    #[serde(default)]
    pub published: bool,
    pub published_date: Option<Date>,
    #[serde(default)]
    pub translations: TranslationMap<MissionTranslationInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissionWithTranslations {
    #[serde(flatten)]
    pub mission: MissionStatement,
    pub translations: Vec<MissionTranslation>,
}
