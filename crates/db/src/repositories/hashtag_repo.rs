//! Repository for the `hashtags` dictionary.

use sqlx::PgPool;

use crate::models::media::Hashtag;

/// Maximum suggestions returned by [`HashtagRepo::search`].
const SEARCH_LIMIT: i64 = 20;

/// Maximum rows returned by [`HashtagRepo::list`].
const LIST_LIMIT: i64 = 100;

pub struct HashtagRepo;

impl HashtagRepo {
    /// Hashtags whose text contains `needle`, alphabetical.
    pub async fn search(pool: &PgPool, needle: &str) -> Result<Vec<Hashtag>, sqlx::Error> {
        sqlx::query_as::<_, Hashtag>(
            "SELECT id, text FROM hashtags WHERE strpos(text, $1) > 0 ORDER BY text LIMIT $2",
        )
        .bind(needle)
        .bind(SEARCH_LIMIT)
        .fetch_all(pool)
        .await
    }

    /// The first hashtags in alphabetical order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Hashtag>, sqlx::Error> {
        sqlx::query_as::<_, Hashtag>("SELECT id, text FROM hashtags ORDER BY text LIMIT $1")
            .bind(LIST_LIMIT)
            .fetch_all(pool)
            .await
    }
}
