//! Repository for films and their translations.
//!
//! [`FilmRepo::upsert`] is the write path for the film editor: it validates
//! the payload, fills blank SEO fields, then writes the film row, one
//! translation row per supported language, and the gallery edges in a
//! single transaction.

use sqlx::{PgPool, Postgres};
use studio_core::error::CoreError;
use studio_core::locale::{validate_language_keys, DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
use studio_core::relations::validate_unique_ids;
use studio_core::seo::{SeoFields, SeoSource};
use studio_core::slug::validate_slug;
use studio_core::translation::require_default_title;
use studio_core::types::{existing_id, DbId};

use crate::error::RepoError;
use crate::models::film::{
    Film, FilmDetail, FilmTranslation, FilmTranslationInput, FilmWithTranslations, UpsertFilm,
};
use crate::models::group_by_parent;
use crate::repositories::media_asset_repo::MediaAssetRepo;
use crate::repositories::relation_graph::{RelationGraph, FILM_GALLERY};

const COLUMNS: &str = "id, slug, published, sort_order, release_date, hero_video_id, tags, \
                       credits, created_at, updated_at";

const TRANSLATION_COLUMNS: &str =
    "film_id, lang, title, logline, synopsis, meta_title, meta_description, keywords";

/// Admin and public listing order: rank, then newest release, then id.
const LIST_ORDER: &str = "sort_order ASC, release_date DESC NULLS LAST, id ASC";

pub struct FilmRepo;

impl FilmRepo {
    /// Create or update a film from an editor payload. Returns the id.
    pub async fn upsert(pool: &PgPool, input: &UpsertFilm) -> Result<DbId, RepoError> {
        let existing = existing_id(input.id.as_ref())?;
        validate_slug(&input.slug)?;
        if let Some(gallery_ids) = &input.gallery_ids {
            validate_unique_ids("gallery", gallery_ids)?;
        }
        validate_translations(input)?;
        let credits = input
            .credits
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| CoreError::Internal(format!("Failed to encode credits: {e}")))?;

        let mut tx = pool.begin().await?;
        let (film_id, stored_tags) = match existing {
            Some(id) => Self::update_inner(&mut tx, id, input, credits.as_ref())
                .await?
                .ok_or_else(|| RepoError::not_found("Film", id))?,
            None => Self::insert_inner(&mut tx, input, credits.as_ref()).await?,
        };

        // Keywords come from the tags as stored, so an update that leaves
        // `tags` out still fills them.
        let tags: Vec<&str> = stored_tags.iter().map(String::as_str).collect();
        for lang in SUPPORTED_LANGUAGES {
            match input.translations.get(*lang) {
                Some(fields) => {
                    let fields = with_seo(fields.clone(), &tags);
                    Self::upsert_translation_inner(&mut tx, film_id, lang, &fields).await?
                }
                None => {
                    let blank = with_seo(FilmTranslationInput::default(), &tags);
                    Self::ensure_translation_inner(&mut tx, film_id, lang, &blank).await?
                }
            }
        }

        if let Some(gallery_ids) = &input.gallery_ids {
            RelationGraph::sync_inner(&mut tx, &FILM_GALLERY, film_id, gallery_ids).await?;
        }
        tx.commit().await?;

        tracing::info!(film_id, created = existing.is_none(), slug = %input.slug, "Film upserted");
        Ok(film_id)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE id = $1");
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every translation row of a film, ordered by language code.
    pub async fn translations(
        pool: &PgPool,
        film_id: DbId,
    ) -> Result<Vec<FilmTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM film_translations WHERE film_id = $1 ORDER BY lang"
        );
        sqlx::query_as::<_, FilmTranslation>(&query)
            .bind(film_id)
            .fetch_all(pool)
            .await
    }

    /// Film with translations, ordered gallery and hero video.
    pub async fn detail(pool: &PgPool, id: DbId) -> Result<Option<FilmDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(film) => Ok(Some(Self::assemble_detail(pool, film).await?)),
            None => Ok(None),
        }
    }

    /// All films for the admin dashboard, published or not.
    pub async fn list(pool: &PgPool) -> Result<Vec<FilmWithTranslations>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films ORDER BY {LIST_ORDER}");
        let films = sqlx::query_as::<_, Film>(&query).fetch_all(pool).await?;
        Self::with_translations(pool, films).await
    }

    /// Published films for the public site.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<FilmWithTranslations>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM films WHERE published = TRUE ORDER BY {LIST_ORDER}");
        let films = sqlx::query_as::<_, Film>(&query).fetch_all(pool).await?;
        Self::with_translations(pool, films).await
    }

    /// Published films among `ids`, in the order of `ids`.
    pub async fn list_published_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<FilmWithTranslations>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films \
             WHERE published = TRUE AND id = ANY($1) \
             ORDER BY array_position($1, id)"
        );
        let films = sqlx::query_as::<_, Film>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Self::with_translations(pool, films).await
    }

    /// A published film by slug, with its detail relations.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<FilmDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE slug = $1 AND published = TRUE");
        let film = sqlx::query_as::<_, Film>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        match film {
            Some(film) => Ok(Some(Self::assemble_detail(pool, film).await?)),
            None => Ok(None),
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert the film row; returns its id and stored tags.
    async fn insert_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        input: &UpsertFilm,
        credits: Option<&serde_json::Value>,
    ) -> Result<(DbId, Vec<String>), sqlx::Error> {
        // New films go to the end of the list.
        sqlx::query_as::<_, (DbId, Vec<String>)>(
            "INSERT INTO films (slug, published, sort_order, release_date, hero_video_id, tags, credits)
             VALUES ($1, $2, (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM films), $3, $4,
                     COALESCE($5, '{}'::TEXT[]), COALESCE($6, '[]'::JSONB))
             RETURNING id, tags",
        )
        .bind(&input.slug)
        .bind(input.published)
        .bind(input.release_date)
        .bind(input.hero_video_id)
        .bind(input.tags.as_deref())
        .bind(credits)
        .fetch_one(&mut **tx)
        .await
    }

    /// Update the film row, keeping `tags` and `credits` when the payload
    /// left them out. `None` when the film does not exist.
    async fn update_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: DbId,
        input: &UpsertFilm,
        credits: Option<&serde_json::Value>,
    ) -> Result<Option<(DbId, Vec<String>)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, Vec<String>)>(
            "UPDATE films SET
                slug = $2,
                published = $3,
                release_date = $4,
                hero_video_id = $5,
                tags = COALESCE($6, tags),
                credits = COALESCE($7, credits),
                updated_at = NOW()
             WHERE id = $1
             RETURNING id, tags",
        )
        .bind(id)
        .bind(&input.slug)
        .bind(input.published)
        .bind(input.release_date)
        .bind(input.hero_video_id)
        .bind(input.tags.as_deref())
        .bind(credits)
        .fetch_optional(&mut **tx)
        .await
    }

    async fn upsert_translation_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        film_id: DbId,
        lang: &str,
        t: &FilmTranslationInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO film_translations
                (film_id, lang, title, logline, synopsis, meta_title, meta_description, keywords)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (film_id, lang) DO UPDATE SET
                title = EXCLUDED.title,
                logline = EXCLUDED.logline,
                synopsis = EXCLUDED.synopsis,
                meta_title = EXCLUDED.meta_title,
                meta_description = EXCLUDED.meta_description,
                keywords = EXCLUDED.keywords",
        )
        .bind(film_id)
        .bind(lang)
        .bind(&t.title)
        .bind(&t.logline)
        .bind(&t.synopsis)
        .bind(&t.meta_title)
        .bind(&t.meta_description)
        .bind(&t.keywords)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Create the row for a language the payload omitted from `blank`,
    /// leaving an existing row untouched.
    async fn ensure_translation_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        film_id: DbId,
        lang: &str,
        blank: &FilmTranslationInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO film_translations (film_id, lang, keywords) VALUES ($1, $2, $3)
             ON CONFLICT (film_id, lang) DO NOTHING",
        )
        .bind(film_id)
        .bind(lang)
        .bind(&blank.keywords)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn with_translations(
        pool: &PgPool,
        films: Vec<Film>,
    ) -> Result<Vec<FilmWithTranslations>, sqlx::Error> {
        let ids: Vec<DbId> = films.iter().map(|f| f.id).collect();
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM film_translations \
             WHERE film_id = ANY($1) ORDER BY film_id, lang"
        );
        let rows = sqlx::query_as::<_, FilmTranslation>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;
        let mut grouped = group_by_parent(rows, |t| t.film_id);
        Ok(films
            .into_iter()
            .map(|film| FilmWithTranslations {
                translations: grouped.remove(&film.id).unwrap_or_default(),
                film,
            })
            .collect())
    }

    async fn assemble_detail(pool: &PgPool, film: Film) -> Result<FilmDetail, sqlx::Error> {
        let translations = Self::translations(pool, film.id).await?;
        let gallery = MediaAssetRepo::gallery(pool, &FILM_GALLERY, film.id).await?;
        let hero_video = match film.hero_video_id {
            Some(id) => MediaAssetRepo::find_by_id(pool, id).await?,
            None => None,
        };
        Ok(FilmDetail {
            film,
            translations,
            gallery,
            hero_video,
        })
    }
}

/// Language keys must be supported and the Greek title present.
fn validate_translations(input: &UpsertFilm) -> Result<(), CoreError> {
    validate_language_keys(input.translations.keys())?;
    require_default_title(
        input
            .translations
            .get(DEFAULT_LANGUAGE)
            .map(|t| t.title.as_str()),
    )
}

/// Fill the blank SEO fields of one translation.
fn with_seo(mut t: FilmTranslationInput, tags: &[&str]) -> FilmTranslationInput {
    let mut seo = SeoFields {
        meta_title: std::mem::take(&mut t.meta_title),
        meta_description: std::mem::take(&mut t.meta_description),
        keywords: std::mem::take(&mut t.keywords),
    };
    seo.auto_fill(&SeoSource {
        title: &t.title,
        descriptions: &[t.logline.as_str(), t.synopsis.as_str()],
        keyword_parts: tags,
    });
    t.meta_title = seo.meta_title;
    t.meta_description = seo.meta_description;
    t.keywords = seo.keywords;
    t
}
