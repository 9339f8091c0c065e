//! Repository for the `media_assets` registry and its hashtag links.

use sqlx::{PgPool, Postgres};
use studio_core::content::MediaKind;
use studio_core::hashtag::normalize_hashtags;
use studio_core::types::DbId;

use crate::error::RepoError;
use crate::models::group_by_parent;
use crate::models::media::{
    GalleryOwner, Hashtag, MediaAsset, MediaAssetWithHashtags, UpdateMediaDetails,
};
use crate::repositories::relation_graph::{
    EdgeTable, RelationGraph, FILM_GALLERY, PRESS_ITEM_GALLERY,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, kind, url, alt, created_at, updated_at";

/// Same columns qualified with the `m` alias, for joins.
const M_COLUMNS: &str = "m.id, m.kind, m.url, m.alt, m.created_at, m.updated_at";

/// Assets referenced by nothing: no gallery edge, no main image, no hero or
/// background video, no home page mask.
const ORPHAN_PREDICATE: &str = "\
    NOT EXISTS (SELECT 1 FROM film_gallery g WHERE g.media_asset_id = m.id) \
    AND NOT EXISTS (SELECT 1 FROM press_item_gallery g WHERE g.media_asset_id = m.id) \
    AND NOT EXISTS (SELECT 1 FROM films f WHERE f.hero_video_id = m.id) \
    AND NOT EXISTS (SELECT 1 FROM press_items p WHERE p.image_id = m.id) \
    AND NOT EXISTS (SELECT 1 FROM home_pages h WHERE h.svg_mask_id = m.id OR h.video_id = m.id) \
    AND NOT EXISTS (SELECT 1 FROM site_settings s WHERE s.homepage_hero_video_id = m.id)";

/// Maximum rows returned by the media library listing.
const LIBRARY_LIMIT: i64 = 200;

/// Registration, mutation and tagging of shared media assets.
pub struct MediaAssetRepo;

impl MediaAssetRepo {
    /// Insert a new asset row for an already-uploaded file.
    pub async fn register(
        pool: &PgPool,
        kind: MediaKind,
        url: &str,
        alt: Option<&str>,
    ) -> Result<MediaAsset, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let asset = Self::register_inner(&mut tx, kind, url, alt).await?;
        tx.commit().await?;
        tracing::info!(asset_id = asset.id, kind = %kind, "Media asset registered");
        Ok(asset)
    }

    /// Register within an existing transaction.
    pub async fn register_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        kind: MediaKind,
        url: &str,
        alt: Option<&str>,
    ) -> Result<MediaAsset, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_assets (kind, url, alt) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(kind.as_str())
            .bind(url)
            .bind(alt)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_assets WHERE id = $1");
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Assets attached to `parent` through a positioned edge table, in
    /// display order.
    pub async fn gallery(
        pool: &PgPool,
        edge: &EdgeTable,
        parent_id: DbId,
    ) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!(
            "SELECT {M_COLUMNS} FROM media_assets m \
             JOIN {t} e ON e.{c} = m.id \
             WHERE e.{p} = $1 \
             ORDER BY e.position, m.id",
            t = edge.table,
            c = edge.child_col,
            p = edge.parent_col
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Most recent assets first, each with its hashtags.
    pub async fn list_with_hashtags(
        pool: &PgPool,
        kind: Option<MediaKind>,
    ) -> Result<Vec<MediaAssetWithHashtags>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_assets \
             WHERE ($1::text IS NULL OR kind = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT {LIBRARY_LIMIT}"
        );
        let assets = sqlx::query_as::<_, MediaAsset>(&query)
            .bind(kind.map(|k| k.as_str()))
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = assets.iter().map(|a| a.id).collect();
        let links: Vec<(DbId, String)> = sqlx::query_as(
            "SELECT mh.media_asset_id, h.text \
             FROM media_asset_hashtags mh JOIN hashtags h ON h.id = mh.hashtag_id \
             WHERE mh.media_asset_id = ANY($1) \
             ORDER BY h.text",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;
        let mut by_asset = group_by_parent(links, |(asset_id, _)| *asset_id);

        Ok(assets
            .into_iter()
            .map(|asset| {
                let hashtags = by_asset
                    .remove(&asset.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(_, text)| text)
                    .collect();
                MediaAssetWithHashtags { asset, hashtags }
            })
            .collect())
    }

    /// Hashtag texts linked to one asset, alphabetical.
    pub async fn hashtags_for(pool: &PgPool, id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT h.text FROM media_asset_hashtags mh \
             JOIN hashtags h ON h.id = mh.hashtag_id \
             WHERE mh.media_asset_id = $1 ORDER BY h.text",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// Point an existing asset at a new URL. The id, and therefore every
    /// reference to the asset, is preserved.
    pub async fn mutate_url(pool: &PgPool, id: DbId, url: &str) -> Result<MediaAsset, RepoError> {
        let query = format!(
            "UPDATE media_assets SET url = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        let asset = sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .bind(url)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| RepoError::not_found("MediaAsset", id))?;
        tracing::info!(asset_id = id, "Media asset URL replaced");
        Ok(asset)
    }

    /// Replace the asset's hashtags with `texts` (trimmed, blanks dropped,
    /// deduplicated). Dictionary rows are created on demand.
    pub async fn tag(pool: &PgPool, id: DbId, texts: &[String]) -> Result<Vec<Hashtag>, RepoError> {
        let normalized = normalize_hashtags(texts)?;
        let mut tx = pool.begin().await?;
        Self::lock_inner(&mut tx, id).await?;
        let tags = Self::tag_inner(&mut tx, id, &normalized).await?;
        tx.commit().await?;
        tracing::info!(asset_id = id, count = tags.len(), "Media asset tagged");
        Ok(tags)
    }

    /// Edit `alt` and/or the hashtag set in one transaction.
    pub async fn update_details(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMediaDetails,
    ) -> Result<MediaAssetWithHashtags, RepoError> {
        let normalized = match &input.hashtags {
            Some(texts) => Some(normalize_hashtags(texts)?),
            None => None,
        };

        let mut tx = pool.begin().await?;
        Self::lock_inner(&mut tx, id).await?;

        let query = format!(
            "UPDATE media_assets SET alt = COALESCE($2, alt), updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let asset = sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .bind(&input.alt)
            .fetch_one(&mut *tx)
            .await?;
        if let Some(texts) = &normalized {
            Self::tag_inner(&mut tx, id, texts).await?;
        }
        tx.commit().await?;

        let hashtags = Self::hashtags_for(pool, id).await?;
        Ok(MediaAssetWithHashtags { asset, hashtags })
    }

    /// Detach an asset from one gallery. The asset row is kept.
    pub async fn unlink(
        pool: &PgPool,
        owner: GalleryOwner,
        asset_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let removed = match owner {
            GalleryOwner::Film(film_id) => {
                RelationGraph::remove(pool, &FILM_GALLERY, film_id, asset_id).await?
            }
            GalleryOwner::PressItem(press_item_id) => {
                RelationGraph::remove(pool, &PRESS_ITEM_GALLERY, press_item_id, asset_id).await?
            }
        };
        tracing::info!(asset_id, ?owner, removed, "Media asset unlinked");
        Ok(removed)
    }

    /// Permanently delete an asset row. Gallery edges cascade; main-image
    /// and video references are set to NULL.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assets nothing refers to any more, oldest first.
    pub async fn list_orphans(pool: &PgPool) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!(
            "SELECT {M_COLUMNS} FROM media_assets m WHERE {ORPHAN_PREDICATE} ORDER BY m.id"
        );
        sqlx::query_as::<_, MediaAsset>(&query).fetch_all(pool).await
    }

    /// Delete every orphaned asset, returning the deleted rows.
    pub async fn purge_orphans(pool: &PgPool) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!(
            "DELETE FROM media_assets m WHERE {ORPHAN_PREDICATE} RETURNING {M_COLUMNS}"
        );
        let purged = sqlx::query_as::<_, MediaAsset>(&query).fetch_all(pool).await?;
        tracing::info!(count = purged.len(), "Orphaned media assets purged");
        Ok(purged)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn lock_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<(), RepoError> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM media_assets WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| RepoError::not_found("MediaAsset", id))?;
        Ok(())
    }

    async fn tag_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: DbId,
        texts: &[String],
    ) -> Result<Vec<Hashtag>, sqlx::Error> {
        sqlx::query("DELETE FROM media_asset_hashtags WHERE media_asset_id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        let mut tags = Vec::with_capacity(texts.len());
        for text in texts {
            // DO UPDATE (rather than DO NOTHING) so RETURNING yields the
            // existing row.
            let tag = sqlx::query_as::<_, Hashtag>(
                "INSERT INTO hashtags (text) VALUES ($1) \
                 ON CONFLICT (text) DO UPDATE SET text = EXCLUDED.text \
                 RETURNING id, text",
            )
            .bind(text)
            .fetch_one(&mut **tx)
            .await?;
            sqlx::query(
                "INSERT INTO media_asset_hashtags (media_asset_id, hashtag_id) VALUES ($1, $2)",
            )
            .bind(id)
            .bind(tag.id)
            .execute(&mut **tx)
            .await?;
            tags.push(tag);
        }
        Ok(tags)
    }
}
