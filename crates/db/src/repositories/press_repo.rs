//! Repository for press items, their translations and relations.

use sqlx::{PgPool, Postgres};
use studio_core::content::MediaKind;
use studio_core::error::CoreError;
use studio_core::locale::{
    validate_language_keys, DEFAULT_LANGUAGE, LANG_EN, SUPPORTED_LANGUAGES,
};
use studio_core::relations::validate_unique_ids;
use studio_core::seo::{SeoFields, SeoSource};
use studio_core::slug::{first_free_slug, slug_or_generate, validate_slug, MAX_SLUG_LEN};
use studio_core::translation::require_default_title;
use studio_core::types::{existing_id, DbId};

use crate::error::RepoError;
use crate::models::media::MediaAsset;
use crate::models::press::{
    PressItem, PressItemDetail, PressItemTranslation, PressItemWithTranslations,
    PressTranslationInput, UpsertPressItem,
};
use crate::models::{group_by_parent, TranslationMap};
use crate::repositories::media_asset_repo::MediaAssetRepo;
use crate::repositories::relation_graph::{RelationGraph, PRESS_ITEM_FILMS, PRESS_ITEM_GALLERY};

const COLUMNS: &str = "id, slug, kind, outlet, url, published, sort_order, published_at, \
                       image_id, created_at, updated_at";

/// Same columns qualified with the `p` alias, for joins.
const P_COLUMNS: &str = "p.id, p.slug, p.kind, p.outlet, p.url, p.published, p.sort_order, \
                         p.published_at, p.image_id, p.created_at, p.updated_at";

const TRANSLATION_COLUMNS: &str =
    "press_item_id, lang, title, description, meta_title, meta_description, keywords";

const LIST_ORDER: &str = "sort_order ASC, published_at DESC NULLS LAST, id ASC";

/// Characters kept free for a `-N` suffix when matching taken slugs.
const SUFFIX_ROOM: usize = 8;

pub struct PressRepo;

impl PressRepo {
    /// Create or update a press item from an editor payload.
    ///
    /// On create a missing slug is derived from the titles or the outlet and
    /// suffixed (`-2`, `-3`, ...) until it is unused; on update a missing
    /// slug keeps the stored one. Relation lists left out keep their edges.
    pub async fn upsert(pool: &PgPool, input: &UpsertPressItem) -> Result<DbId, RepoError> {
        let existing = existing_id(input.id.as_ref())?;
        let translations = prepare_translations(input)?;
        let slug = resolve_slug(input, existing.is_none())?;
        if let Some(gallery_ids) = &input.gallery_ids {
            validate_unique_ids("gallery", gallery_ids)?;
        }
        if let Some(film_ids) = &input.film_ids {
            validate_unique_ids("related films", film_ids)?;
        }

        let mut tx = pool.begin().await?;
        let press_item_id = match (existing, slug) {
            (Some(id), slug) => Self::update_inner(&mut tx, id, input, slug.given())
                .await?
                .ok_or_else(|| RepoError::not_found("PressItem", id))?,
            (None, SlugChoice::Derived(base)) => {
                let slug = Self::free_slug_inner(&mut tx, &base).await?;
                Self::insert_inner(&mut tx, input, &slug).await?
            }
            (None, SlugChoice::Given(slug)) => Self::insert_inner(&mut tx, input, &slug).await?,
            (None, SlugChoice::Keep) => {
                return Err(CoreError::Internal("No slug for a new press item".into()).into())
            }
        };

        let blank = with_seo(PressTranslationInput::default(), input);
        for lang in SUPPORTED_LANGUAGES {
            match translations.get(*lang) {
                Some(fields) => {
                    Self::upsert_translation_inner(&mut tx, press_item_id, lang, fields).await?
                }
                None => {
                    Self::ensure_translation_inner(&mut tx, press_item_id, lang, &blank).await?
                }
            }
        }

        if let Some(gallery_ids) = &input.gallery_ids {
            RelationGraph::sync_inner(&mut tx, &PRESS_ITEM_GALLERY, press_item_id, gallery_ids)
                .await?;
        }
        if let Some(film_ids) = &input.film_ids {
            RelationGraph::sync_inner(&mut tx, &PRESS_ITEM_FILMS, press_item_id, film_ids).await?;
        }
        tx.commit().await?;

        tracing::info!(press_item_id, created = existing.is_none(), "Press item upserted");
        Ok(press_item_id)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PressItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM press_items WHERE id = $1");
        sqlx::query_as::<_, PressItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn translations(
        pool: &PgPool,
        press_item_id: DbId,
    ) -> Result<Vec<PressItemTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM press_item_translations \
             WHERE press_item_id = $1 ORDER BY lang"
        );
        sqlx::query_as::<_, PressItemTranslation>(&query)
            .bind(press_item_id)
            .fetch_all(pool)
            .await
    }

    /// Press item with translations, main image, gallery and related films.
    pub async fn detail(pool: &PgPool, id: DbId) -> Result<Option<PressItemDetail>, sqlx::Error> {
        let Some(item) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let translations = Self::translations(pool, id).await?;
        let image = match item.image_id {
            Some(image_id) => MediaAssetRepo::find_by_id(pool, image_id).await?,
            None => None,
        };
        let gallery = MediaAssetRepo::gallery(pool, &PRESS_ITEM_GALLERY, id).await?;
        let film_ids = RelationGraph::child_ids(pool, &PRESS_ITEM_FILMS, id).await?;
        Ok(Some(PressItemDetail {
            item,
            translations,
            image,
            gallery,
            film_ids,
        }))
    }

    /// All press items for the admin dashboard.
    pub async fn list(pool: &PgPool) -> Result<Vec<PressItemWithTranslations>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM press_items ORDER BY {LIST_ORDER}");
        let items = sqlx::query_as::<_, PressItem>(&query).fetch_all(pool).await?;
        Self::with_translations(pool, items).await
    }

    pub async fn list_published(
        pool: &PgPool,
    ) -> Result<Vec<PressItemWithTranslations>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM press_items WHERE published = TRUE ORDER BY {LIST_ORDER}"
        );
        let items = sqlx::query_as::<_, PressItem>(&query).fetch_all(pool).await?;
        Self::with_translations(pool, items).await
    }

    /// Published press items among `ids`, in the order of `ids`.
    pub async fn list_published_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<PressItemWithTranslations>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM press_items \
             WHERE published = TRUE AND id = ANY($1) \
             ORDER BY array_position($1, id)"
        );
        let items = sqlx::query_as::<_, PressItem>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Self::with_translations(pool, items).await
    }

    /// Published press items linked to a film.
    pub async fn list_published_for_film(
        pool: &PgPool,
        film_id: DbId,
    ) -> Result<Vec<PressItemWithTranslations>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS} FROM press_items p \
             JOIN press_item_films pf ON pf.press_item_id = p.id \
             WHERE pf.film_id = $1 AND p.published = TRUE \
             ORDER BY p.sort_order ASC, p.published_at DESC NULLS LAST, p.id ASC"
        );
        let items = sqlx::query_as::<_, PressItem>(&query)
            .bind(film_id)
            .fetch_all(pool)
            .await?;
        Self::with_translations(pool, items).await
    }

    /// Register an uploaded screenshot, make it the item's main image and
    /// append it to the gallery, all in one transaction.
    pub async fn attach_screenshot(
        pool: &PgPool,
        press_item_id: DbId,
        url: &str,
        alt: &str,
    ) -> Result<MediaAsset, RepoError> {
        let mut tx = pool.begin().await?;
        sqlx::query_scalar::<_, DbId>("SELECT id FROM press_items WHERE id = $1 FOR UPDATE")
            .bind(press_item_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepoError::not_found("PressItem", press_item_id))?;

        let asset = MediaAssetRepo::register_inner(&mut tx, MediaKind::Image, url, Some(alt)).await?;
        sqlx::query("UPDATE press_items SET image_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(press_item_id)
            .bind(asset.id)
            .execute(&mut *tx)
            .await?;
        RelationGraph::append_inner(&mut tx, &PRESS_ITEM_GALLERY, press_item_id, asset.id).await?;
        tx.commit().await?;

        tracing::info!(press_item_id, asset_id = asset.id, "Screenshot attached to press item");
        Ok(asset)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn insert_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        input: &UpsertPressItem,
        slug: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO press_items (slug, kind, outlet, url, published, sort_order, published_at, image_id)
             VALUES ($1, $2, $3, $4, $5,
                     (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM press_items), $6, $7)
             RETURNING id",
        )
        .bind(slug)
        .bind(input.kind.as_str())
        .bind(input.outlet.trim())
        .bind(&input.url)
        .bind(input.published)
        .bind(input.published_at)
        .bind(input.image_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn update_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: DbId,
        input: &UpsertPressItem,
        slug: Option<&str>,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "UPDATE press_items SET
                slug = COALESCE($2, slug),
                kind = $3,
                outlet = $4,
                url = $5,
                published = $6,
                published_at = $7,
                image_id = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(slug)
        .bind(input.kind.as_str())
        .bind(input.outlet.trim())
        .bind(&input.url)
        .bind(input.published)
        .bind(input.published_at)
        .bind(input.image_id)
        .fetch_optional(&mut **tx)
        .await
    }

    async fn upsert_translation_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        press_item_id: DbId,
        lang: &str,
        t: &PressTranslationInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO press_item_translations
                (press_item_id, lang, title, description, meta_title, meta_description, keywords)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (press_item_id, lang) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                meta_title = EXCLUDED.meta_title,
                meta_description = EXCLUDED.meta_description,
                keywords = EXCLUDED.keywords",
        )
        .bind(press_item_id)
        .bind(lang)
        .bind(&t.title)
        .bind(&t.description)
        .bind(&t.meta_title)
        .bind(&t.meta_description)
        .bind(&t.keywords)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Create the row for an omitted language from `blank`; an existing row
    /// is left alone.
    async fn ensure_translation_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        press_item_id: DbId,
        lang: &str,
        blank: &PressTranslationInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO press_item_translations (press_item_id, lang, keywords) VALUES ($1, $2, $3)
             ON CONFLICT (press_item_id, lang) DO NOTHING",
        )
        .bind(press_item_id)
        .bind(lang)
        .bind(&blank.keywords)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// First unused slug of `base`, `base-2`, `base-3`, ...
    async fn free_slug_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        base: &str,
    ) -> Result<String, sqlx::Error> {
        // Generated slugs are `[a-z0-9-]`, so the prefix has no LIKE wildcards.
        let prefix: String = base.chars().take(MAX_SLUG_LEN - SUFFIX_ROOM).collect();
        let taken: Vec<String> =
            sqlx::query_scalar("SELECT slug FROM press_items WHERE slug LIKE $1 || '%'")
                .bind(&prefix)
                .fetch_all(&mut **tx)
                .await?;
        Ok(first_free_slug(base, &taken))
    }

    async fn with_translations(
        pool: &PgPool,
        items: Vec<PressItem>,
    ) -> Result<Vec<PressItemWithTranslations>, sqlx::Error> {
        let ids: Vec<DbId> = items.iter().map(|p| p.id).collect();
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM press_item_translations \
             WHERE press_item_id = ANY($1) ORDER BY press_item_id, lang"
        );
        let rows = sqlx::query_as::<_, PressItemTranslation>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;
        let mut grouped = group_by_parent(rows, |t| t.press_item_id);
        Ok(items
            .into_iter()
            .map(|item| PressItemWithTranslations {
                translations: grouped.remove(&item.id).unwrap_or_default(),
                item,
            })
            .collect())
    }
}

/// Where the slug of an upsert comes from.
enum SlugChoice {
    /// Update without a slug: keep the stored one.
    Keep,
    Given(String),
    /// Derived from the content; may still need a suffix.
    Derived(String),
}

impl SlugChoice {
    fn given(&self) -> Option<&str> {
        match self {
            SlugChoice::Keep => None,
            SlugChoice::Given(slug) | SlugChoice::Derived(slug) => Some(slug),
        }
    }
}

fn resolve_slug(input: &UpsertPressItem, creating: bool) -> Result<SlugChoice, CoreError> {
    let explicit = input.slug.as_deref().map(str::trim).filter(|s| !s.is_empty());
    match explicit {
        Some(slug) => {
            validate_slug(slug)?;
            Ok(SlugChoice::Given(slug.to_string()))
        }
        None if creating => {
            let candidates = [
                title_of(input, DEFAULT_LANGUAGE),
                title_of(input, LANG_EN),
                input.outlet.as_str(),
            ];
            slug_or_generate(None, &candidates).map(SlugChoice::Derived)
        }
        None => Ok(SlugChoice::Keep),
    }
}

fn title_of<'a>(input: &'a UpsertPressItem, lang: &str) -> &'a str {
    input
        .translations
        .get(lang)
        .map(|t| t.title.as_str())
        .unwrap_or_default()
}

fn prepare_translations(
    input: &UpsertPressItem,
) -> Result<TranslationMap<PressTranslationInput>, CoreError> {
    validate_language_keys(input.translations.keys())?;
    require_default_title(
        input
            .translations
            .get(DEFAULT_LANGUAGE)
            .map(|t| t.title.as_str()),
    )?;

    Ok(input
        .translations
        .iter()
        .map(|(lang, t)| (lang.clone(), with_seo(t.clone(), input)))
        .collect())
}

/// Fill the blank SEO fields of one translation; keywords come from the
/// outlet and kind.
fn with_seo(mut t: PressTranslationInput, input: &UpsertPressItem) -> PressTranslationInput {
    let keyword_parts = [input.outlet.as_str(), input.kind.as_str()];
    let mut seo = SeoFields {
        meta_title: std::mem::take(&mut t.meta_title),
        meta_description: std::mem::take(&mut t.meta_description),
        keywords: std::mem::take(&mut t.keywords),
    };
    seo.auto_fill(&SeoSource {
        title: &t.title,
        descriptions: &[t.description.as_str()],
        keyword_parts: &keyword_parts,
    });
    t.meta_title = seo.meta_title;
    t.meta_description = seo.meta_description;
    t.keywords = seo.keywords;
    t
}
