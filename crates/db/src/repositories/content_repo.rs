//! Operations shared by every orderable content kind.

use sqlx::PgPool;
use studio_core::content::OrderableKind;
use studio_core::error::CoreError;
use studio_core::locale::DEFAULT_LANGUAGE;
use studio_core::types::DbId;

use crate::error::RepoError;

pub struct ContentRepo;

impl ContentRepo {
    /// Permanently delete a film, press item or mission statement.
    ///
    /// Translations and relation edges cascade; media assets survive.
    pub async fn delete(pool: &PgPool, kind: OrderableKind, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(pool)
            .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(kind = %kind.content_kind(), id, "Content deleted");
        }
        Ok(deleted)
    }

    /// Inline edit of the default-language title. Other languages and the
    /// SEO fields are left as they are.
    pub async fn update_title(
        pool: &PgPool,
        kind: OrderableKind,
        id: DbId,
        title: &str,
    ) -> Result<(), RepoError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("Title must not be empty".into()).into());
        }
        let (translation_table, fk) = kind.translation_table();

        let mut tx = pool.begin().await?;
        sqlx::query_scalar::<_, DbId>(&format!(
            "UPDATE {} SET updated_at = NOW() WHERE id = $1 RETURNING id",
            kind.table()
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::not_found(kind.content_kind().entity_name(), id))?;

        sqlx::query(&format!(
            "INSERT INTO {translation_table} ({fk}, lang, title) VALUES ($1, $2, $3) \
             ON CONFLICT ({fk}, lang) DO UPDATE SET title = EXCLUDED.title"
        ))
        .bind(id)
        .bind(DEFAULT_LANGUAGE)
        .bind(title)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(kind = %kind.content_kind(), id, "Title updated");
        Ok(())
    }
}
