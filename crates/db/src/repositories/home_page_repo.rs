//! Repository for the home page singleton.

use sqlx::{PgPool, Postgres};
use studio_core::featured::validate_featured;
use studio_core::locale::{validate_language_keys, SUPPORTED_LANGUAGES};
use studio_core::types::SINGLETON_ID;

use crate::error::RepoError;
use crate::models::home::{HomePage, HomePageDetail, HomePageTranslation, UpdateHomePage};
use crate::repositories::relation_graph::{
    RelationGraph, HOME_FEATURED_FILMS, HOME_FEATURED_PRESS,
};

const COLUMNS: &str = "id, svg_mask_id, video_id, created_at, updated_at";

pub struct HomePageRepo;

impl HomePageRepo {
    /// Return the singleton, creating it (with empty translations) on first
    /// access.
    pub async fn get_or_create(pool: &PgPool) -> Result<HomePage, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let page = Self::get_or_create_inner(&mut tx).await?;
        tx.commit().await?;
        Ok(page)
    }

    /// The singleton with translations and featured ids in display order.
    pub async fn detail(pool: &PgPool) -> Result<HomePageDetail, sqlx::Error> {
        let page = Self::get_or_create(pool).await?;
        let translations = sqlx::query_as::<_, HomePageTranslation>(
            "SELECT lang, title, hero_text FROM home_page_translations \
             WHERE home_page_id = $1 ORDER BY lang",
        )
        .bind(SINGLETON_ID)
        .fetch_all(pool)
        .await?;
        let featured_film_ids =
            RelationGraph::child_ids(pool, &HOME_FEATURED_FILMS, SINGLETON_ID).await?;
        let featured_press_ids =
            RelationGraph::child_ids(pool, &HOME_FEATURED_PRESS, SINGLETON_ID).await?;
        Ok(HomePageDetail {
            page,
            translations,
            featured_film_ids,
            featured_press_ids,
        })
    }

    /// Replace the home page configuration.
    ///
    /// Featured caps and language keys are checked before the transaction
    /// opens, so a rejected payload leaves nothing written.
    pub async fn update(pool: &PgPool, input: &UpdateHomePage) -> Result<HomePageDetail, RepoError> {
        validate_featured(&input.featured_film_ids, &input.featured_press_ids)?;
        validate_language_keys(input.translations.keys())?;

        let mut tx = pool.begin().await?;
        Self::get_or_create_inner(&mut tx).await?;
        sqlx::query(
            "UPDATE home_pages SET svg_mask_id = $2, video_id = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(SINGLETON_ID)
        .bind(input.svg_mask_id)
        .bind(input.video_id)
        .execute(&mut *tx)
        .await?;

        for (lang, t) in &input.translations {
            sqlx::query(
                "INSERT INTO home_page_translations (home_page_id, lang, title, hero_text)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (home_page_id, lang) DO UPDATE SET
                    title = EXCLUDED.title,
                    hero_text = EXCLUDED.hero_text",
            )
            .bind(SINGLETON_ID)
            .bind(lang)
            .bind(&t.title)
            .bind(&t.hero_text)
            .execute(&mut *tx)
            .await?;
        }

        RelationGraph::sync_inner(
            &mut tx,
            &HOME_FEATURED_FILMS,
            SINGLETON_ID,
            &input.featured_film_ids,
        )
        .await?;
        RelationGraph::sync_inner(
            &mut tx,
            &HOME_FEATURED_PRESS,
            SINGLETON_ID,
            &input.featured_press_ids,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            featured_films = input.featured_film_ids.len(),
            featured_press = input.featured_press_ids.len(),
            "Home page updated"
        );
        Ok(Self::detail(pool).await?)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn get_or_create_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
    ) -> Result<HomePage, sqlx::Error> {
        sqlx::query("INSERT INTO home_pages (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(SINGLETON_ID)
            .execute(&mut **tx)
            .await?;
        for lang in SUPPORTED_LANGUAGES {
            sqlx::query(
                "INSERT INTO home_page_translations (home_page_id, lang) VALUES ($1, $2)
                 ON CONFLICT (home_page_id, lang) DO NOTHING",
            )
            .bind(SINGLETON_ID)
            .bind(*lang)
            .execute(&mut **tx)
            .await?;
        }
        let query = format!("SELECT {COLUMNS} FROM home_pages WHERE id = $1");
        sqlx::query_as::<_, HomePage>(&query)
            .bind(SINGLETON_ID)
            .fetch_one(&mut **tx)
            .await
    }
}
