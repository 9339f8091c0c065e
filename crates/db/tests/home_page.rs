//! Integration tests for the home page singleton.

use std::collections::BTreeMap;

use assert_matches::assert_matches;
use sqlx::PgPool;
use studio_core::error::CoreError;
use studio_core::translation::resolve;
use studio_db::models::home::{HomeTranslationInput, UpdateHomePage};
use studio_db::repositories::HomePageRepo;
use studio_db::RepoError;

async fn films(pool: &PgPool, n: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let row: (i64,) = sqlx::query_as("INSERT INTO films (slug) VALUES ($1) RETURNING id")
            .bind(format!("film-{i}"))
            .fetch_one(pool)
            .await
            .unwrap();
        ids.push(row.0);
    }
    ids
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_featured_order_and_translations(pool: PgPool) {
    let ids = films(&pool, 3).await;
    let mut translations = BTreeMap::new();
    translations.insert(
        "en".to_string(),
        HomeTranslationInput {
            title: "Studio".to_string(),
            hero_text: "We make films".to_string(),
        },
    );

    let detail = HomePageRepo::update(
        &pool,
        &UpdateHomePage {
            featured_film_ids: vec![ids[2], ids[0]],
            translations,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(detail.featured_film_ids, vec![ids[2], ids[0]]);
    assert_eq!(resolve(&detail.translations, "en").unwrap().title, "Studio");
    assert_eq!(resolve(&detail.translations, "el").unwrap().title, "");

    let detail = HomePageRepo::update(
        &pool,
        &UpdateHomePage {
            featured_film_ids: vec![ids[1]],
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(detail.featured_film_ids, vec![ids[1]]);
    // Omitted languages keep their text.
    assert_eq!(resolve(&detail.translations, "en").unwrap().title, "Studio");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_five_featured_films_rejected_without_writes(pool: PgPool) {
    let ids = films(&pool, 5).await;
    HomePageRepo::update(
        &pool,
        &UpdateHomePage {
            featured_film_ids: ids[..2].to_vec(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = HomePageRepo::update(
        &pool,
        &UpdateHomePage {
            featured_film_ids: ids.clone(),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Validation(_)));

    let detail = HomePageRepo::detail(&pool).await.unwrap();
    assert_eq!(detail.featured_film_ids, ids[..2].to_vec());
}
