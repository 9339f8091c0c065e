//! Integration tests for reorder, delete and inline title edits.

use std::collections::BTreeMap;

use assert_matches::assert_matches;
use sqlx::PgPool;
use studio_core::content::OrderableKind;
use studio_core::error::CoreError;
use studio_core::translation::resolve;
use studio_db::models::mission::{MissionTranslationInput, UpsertMission};
use studio_db::repositories::{ContentRepo, MissionRepo, ReorderRepo};
use studio_db::RepoError;

fn mission(slug: &str) -> UpsertMission {
    let mut translations = BTreeMap::new();
    translations.insert(
        "el".to_string(),
        MissionTranslationInput {
            title: format!("Αποστολή {slug}"),
            short_description: "Σύντομη".to_string(),
            phrases: vec!["μία".to_string(), " ".to_string()],
            ..Default::default()
        },
    );
    UpsertMission {
        id: None,
        slug: slug.to_string(),
        published: true,
        published_date: None,
        translations,
    }
}

async fn listed_slugs(pool: &PgPool) -> Vec<String> {
    MissionRepo::list(pool)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.mission.slug)
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_items_append_to_end(pool: PgPool) {
    for slug in ["a", "b", "c"] {
        MissionRepo::upsert(&pool, &mission(slug)).await.unwrap();
    }
    assert_eq!(listed_slugs(&pool).await, vec!["a", "b", "c"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sequential_reorders(pool: PgPool) {
    let a = MissionRepo::upsert(&pool, &mission("a")).await.unwrap();
    let b = MissionRepo::upsert(&pool, &mission("b")).await.unwrap();
    let c = MissionRepo::upsert(&pool, &mission("c")).await.unwrap();

    let kind = OrderableKind::MissionStatement;
    ReorderRepo::reorder(&pool, kind, &[a, b, c]).await.unwrap();
    ReorderRepo::reorder(&pool, kind, &[c, a, b]).await.unwrap();

    let ranks: Vec<(i64, i32)> =
        sqlx::query_as("SELECT id, sort_order FROM mission_statements ORDER BY sort_order")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(ranks, vec![(c, 0), (a, 1), (b, 2)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_reorder_rejected_without_change(pool: PgPool) {
    let a = MissionRepo::upsert(&pool, &mission("a")).await.unwrap();
    let b = MissionRepo::upsert(&pool, &mission("b")).await.unwrap();
    MissionRepo::upsert(&pool, &mission("c")).await.unwrap();

    let err = ReorderRepo::reorder(&pool, OrderableKind::MissionStatement, &[b, a])
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Validation(_)));
    assert_eq!(listed_slugs(&pool).await, vec!["a", "b", "c"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_unknown_id_rejected(pool: PgPool) {
    let a = MissionRepo::upsert(&pool, &mission("a")).await.unwrap();
    let err = ReorderRepo::reorder(&pool, OrderableKind::MissionStatement, &[a, 777])
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mission_seo_and_phrases(pool: PgPool) {
    let id = MissionRepo::upsert(&pool, &mission("seo")).await.unwrap();
    let stored = MissionRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    let el = resolve(&stored.translations, "el").unwrap();
    assert_eq!(el.meta_title, "Αποστολή seo");
    assert_eq!(el.meta_description, "Σύντομη");
    assert_eq!(el.keywords, "");
    assert_eq!(el.phrases, vec!["μία".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_title_only_touches_greek(pool: PgPool) {
    let id = MissionRepo::upsert(&pool, &mission("inline")).await.unwrap();
    ContentRepo::update_title(&pool, OrderableKind::MissionStatement, id, "Νέος")
        .await
        .unwrap();

    let stored = MissionRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(resolve(&stored.translations, "el").unwrap().title, "Νέος");
    assert_eq!(resolve(&stored.translations, "en").unwrap().title, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_title_missing_entity(pool: PgPool) {
    let err = ContentRepo::update_title(&pool, OrderableKind::Film, 5, "Τίτλος")
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::NotFound { entity: "Film", .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_translations(pool: PgPool) {
    let id = MissionRepo::upsert(&pool, &mission("gone")).await.unwrap();
    assert!(ContentRepo::delete(&pool, OrderableKind::MissionStatement, id).await.unwrap());
    assert!(!ContentRepo::delete(&pool, OrderableKind::MissionStatement, id).await.unwrap());

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mission_statement_translations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}
