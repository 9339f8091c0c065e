//! Repository for the site settings singleton.

use sqlx::PgPool;
use studio_core::types::SINGLETON_ID;

use crate::models::settings::{SiteSettings, UpdateSiteSettings};

const COLUMNS: &str = "id, site_title, contact_email, social_instagram, social_vimeo, \
                       social_linkedin, social_facebook, homepage_hero_video_id, \
                       created_at, updated_at";

pub struct SiteSettingsRepo;

impl SiteSettingsRepo {
    /// Return the singleton, creating an empty one on first access.
    pub async fn get_or_create(pool: &PgPool) -> Result<SiteSettings, sqlx::Error> {
        // DO UPDATE with a no-op so RETURNING yields the row either way.
        let query = format!(
            "INSERT INTO site_settings (id) VALUES ($1)
             ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSettings>(&query)
            .bind(SINGLETON_ID)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields are written.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateSiteSettings,
    ) -> Result<SiteSettings, sqlx::Error> {
        Self::get_or_create(pool).await?;
        let query = format!(
            "UPDATE site_settings SET
                site_title = COALESCE($2, site_title),
                contact_email = COALESCE($3, contact_email),
                social_instagram = COALESCE($4, social_instagram),
                social_vimeo = COALESCE($5, social_vimeo),
                social_linkedin = COALESCE($6, social_linkedin),
                social_facebook = COALESCE($7, social_facebook),
                homepage_hero_video_id = COALESCE($8, homepage_hero_video_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let settings = sqlx::query_as::<_, SiteSettings>(&query)
            .bind(SINGLETON_ID)
            .bind(&input.site_title)
            .bind(&input.contact_email)
            .bind(&input.social_instagram)
            .bind(&input.social_vimeo)
            .bind(&input.social_linkedin)
            .bind(&input.social_facebook)
            .bind(input.homepage_hero_video_id)
            .fetch_one(pool)
            .await?;
        tracing::info!("Site settings updated");
        Ok(settings)
    }
}
