//! Repository for mission statements and their translations.

use sqlx::{PgPool, Postgres};
use studio_core::error::CoreError;
use studio_core::locale::{validate_language_keys, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
use studio_core::seo::{fill_meta_description, fill_meta_title};
use studio_core::slug::validate_slug;
use studio_core::translation::require_default_title;
use studio_core::types::{existing_id, DbId};

use crate::error::RepoError;
use crate::models::mission::{
    MissionStatement, MissionTranslation, MissionTranslationInput, MissionWithTranslations,
    UpsertMission,
};
use crate::models::{group_by_parent, TranslationMap};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, published, sort_order, published_date, created_at, updated_at";

const TRANSLATION_COLUMNS: &str = "mission_statement_id, lang, title, short_description, \
                                   long_description, phrases, mottos, meta_title, \
                                   meta_description, keywords";

const LIST_ORDER: &str = "sort_order ASC, published_date DESC NULLS LAST, id ASC";

pub struct MissionRepo;

impl MissionRepo {
    /// Create or update a mission statement. Returns the id.
    pub async fn upsert(pool: &PgPool, input: &UpsertMission) -> Result<DbId, RepoError> {
        let existing = existing_id(input.id.as_ref())?;
        validate_slug(&input.slug)?;
        let translations = prepare_translations(input)?;

        let mut tx = pool.begin().await?;
        let mission_id = match existing {
            Some(id) => sqlx::query_scalar::<_, DbId>(
                "UPDATE mission_statements SET
                    slug = $2,
                    published = $3,
                    published_date = $4,
                    updated_at = NOW()
                 WHERE id = $1
                 RETURNING id",
            )
            .bind(id)
            .bind(&input.slug)
            .bind(input.published)
            .bind(input.published_date)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepoError::not_found("MissionStatement", id))?,
            None => sqlx::query_scalar::<_, DbId>(
                "INSERT INTO mission_statements (slug, published, sort_order, published_date)
                 VALUES ($1, $2, (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM mission_statements), $3)
                 RETURNING id",
            )
            .bind(&input.slug)
            .bind(input.published)
            .bind(input.published_date)
            .fetch_one(&mut *tx)
            .await?,
        };

        for lang in SUPPORTED_LANGUAGES {
            match translations.get(*lang) {
                Some(fields) => {
                    Self::upsert_translation_inner(&mut tx, mission_id, lang, fields).await?
                }
                None => Self::ensure_translation_inner(&mut tx, mission_id, lang).await?,
            }
        }
        tx.commit().await?;

        tracing::info!(mission_id, created = existing.is_none(), "Mission statement upserted");
        Ok(mission_id)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MissionWithTranslations>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mission_statements WHERE id = $1");
        let mission = sqlx::query_as::<_, MissionStatement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match mission {
            Some(mission) => Ok(Self::with_translations(pool, vec![mission]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<MissionWithTranslations>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mission_statements ORDER BY {LIST_ORDER}");
        let missions = sqlx::query_as::<_, MissionStatement>(&query)
            .fetch_all(pool)
            .await?;
        Self::with_translations(pool, missions).await
    }

    pub async fn list_published(
        pool: &PgPool,
    ) -> Result<Vec<MissionWithTranslations>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mission_statements WHERE published = TRUE ORDER BY {LIST_ORDER}"
        );
        let missions = sqlx::query_as::<_, MissionStatement>(&query)
            .fetch_all(pool)
            .await?;
        Self::with_translations(pool, missions).await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn upsert_translation_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        mission_id: DbId,
        lang: &str,
        t: &MissionTranslationInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO mission_statement_translations
                (mission_statement_id, lang, title, short_description, long_description,
                 phrases, mottos, meta_title, meta_description, keywords)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (mission_statement_id, lang) DO UPDATE SET
                title = EXCLUDED.title,
                short_description = EXCLUDED.short_description,
                long_description = EXCLUDED.long_description,
                phrases = EXCLUDED.phrases,
                mottos = EXCLUDED.mottos,
                meta_title = EXCLUDED.meta_title,
                meta_description = EXCLUDED.meta_description,
                keywords = EXCLUDED.keywords",
        )
        .bind(mission_id)
        .bind(lang)
        .bind(&t.title)
        .bind(&t.short_description)
        .bind(&t.long_description)
        .bind(&t.phrases)
        .bind(&t.mottos)
        .bind(&t.meta_title)
        .bind(&t.meta_description)
        .bind(&t.keywords)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn ensure_translation_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        mission_id: DbId,
        lang: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO mission_statement_translations (mission_statement_id, lang)
             VALUES ($1, $2)
             ON CONFLICT (mission_statement_id, lang) DO NOTHING",
        )
        .bind(mission_id)
        .bind(lang)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn with_translations(
        pool: &PgPool,
        missions: Vec<MissionStatement>,
    ) -> Result<Vec<MissionWithTranslations>, sqlx::Error> {
        let ids: Vec<DbId> = missions.iter().map(|m| m.id).collect();
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM mission_statement_translations \
             WHERE mission_statement_id = ANY($1) ORDER BY mission_statement_id, lang"
        );
        let rows = sqlx::query_as::<_, MissionTranslation>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;
        let mut grouped = group_by_parent(rows, |t| t.mission_statement_id);
        Ok(missions
            .into_iter()
            .map(|mission| MissionWithTranslations {
                translations: grouped.remove(&mission.id).unwrap_or_default(),
                mission,
            })
            .collect())
    }
}

/// Missions derive title and description only; keywords are left as sent.
fn prepare_translations(
    input: &UpsertMission,
) -> Result<TranslationMap<MissionTranslationInput>, CoreError> {
    validate_language_keys(input.translations.keys())?;
    require_default_title(
        input
            .translations
            .get(DEFAULT_LANGUAGE)
            .map(|t| t.title.as_str()),
    )?;

    let mut prepared = input.translations.clone();
    for t in prepared.values_mut() {
        fill_meta_title(&mut t.meta_title, &t.title);
        fill_meta_description(
            &mut t.meta_description,
            &[t.short_description.as_str(), t.long_description.as_str()],
        );
        t.phrases.retain(|p| !p.trim().is_empty());
        t.mottos.retain(|m| !m.trim().is_empty());
    }
    Ok(prepared)
}
