//! Integration tests for the media asset lifecycle.

use assert_matches::assert_matches;
use sqlx::PgPool;
use studio_core::content::MediaKind;
use studio_core::error::CoreError;
use studio_db::models::media::{GalleryOwner, UpdateMediaDetails};
use studio_db::models::settings::UpdateSiteSettings;
use studio_db::repositories::{HashtagRepo, MediaAssetRepo, SiteSettingsRepo};
use studio_db::RepoError;

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mutate_url_preserves_identity(pool: PgPool) {
    let asset = MediaAssetRepo::register(&pool, MediaKind::Image, "https://cdn.test/a.jpg", Some("a"))
        .await
        .unwrap();
    let updated = MediaAssetRepo::mutate_url(&pool, asset.id, "https://cdn.test/processed.png")
        .await
        .unwrap();
    assert_eq!(updated.id, asset.id);
    assert_eq!(updated.url, "https://cdn.test/processed.png");
    assert_eq!(updated.alt.as_deref(), Some("a"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mutate_url_missing_asset(pool: PgPool) {
    let err = MediaAssetRepo::mutate_url(&pool, 42, "https://cdn.test/x.png")
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::NotFound { entity: "MediaAsset", id: 42 }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_replaces_and_dedupes(pool: PgPool) {
    let asset = MediaAssetRepo::register(&pool, MediaKind::Video, "https://cdn.test/v.mp4", None)
        .await
        .unwrap();

    MediaAssetRepo::tag(&pool, asset.id, &strings(&["bts", " #bts", "set"]))
        .await
        .unwrap();
    assert_eq!(
        MediaAssetRepo::hashtags_for(&pool, asset.id).await.unwrap(),
        strings(&["bts", "set"])
    );

    MediaAssetRepo::tag(&pool, asset.id, &strings(&["premiere", ""]))
        .await
        .unwrap();
    assert_eq!(
        MediaAssetRepo::hashtags_for(&pool, asset.id).await.unwrap(),
        strings(&["premiere"])
    );

    // Dictionary rows survive unlinking.
    let all = HashtagRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hashtag_search_contains(pool: PgPool) {
    let asset = MediaAssetRepo::register(&pool, MediaKind::Image, "https://cdn.test/a.jpg", None)
        .await
        .unwrap();
    MediaAssetRepo::tag(&pool, asset.id, &strings(&["behind-scenes", "scenery", "cast"]))
        .await
        .unwrap();

    let found: Vec<_> = HashtagRepo::search(&pool, "scen")
        .await
        .unwrap()
        .into_iter()
        .map(|h| h.text)
        .collect();
    assert_eq!(found, strings(&["behind-scenes", "scenery"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_details(pool: PgPool) {
    let asset = MediaAssetRepo::register(&pool, MediaKind::Image, "https://cdn.test/a.jpg", None)
        .await
        .unwrap();
    let updated = MediaAssetRepo::update_details(
        &pool,
        asset.id,
        &UpdateMediaDetails {
            alt: Some("Poster".to_string()),
            hashtags: Some(strings(&["poster"])),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.asset.alt.as_deref(), Some("Poster"));
    assert_eq!(updated.hashtags, strings(&["poster"]));

    // Omitted fields stay as they are.
    let again = MediaAssetRepo::update_details(&pool, asset.id, &UpdateMediaDetails::default())
        .await
        .unwrap();
    assert_eq!(again.asset.alt.as_deref(), Some("Poster"));
    assert_eq!(again.hashtags, strings(&["poster"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unlink_and_orphan_purge(pool: PgPool) {
    let linked = MediaAssetRepo::register(&pool, MediaKind::Image, "https://cdn.test/1.jpg", None)
        .await
        .unwrap();
    let hero = MediaAssetRepo::register(&pool, MediaKind::Video, "https://cdn.test/h.mp4", None)
        .await
        .unwrap();
    let loose = MediaAssetRepo::register(&pool, MediaKind::Image, "https://cdn.test/2.jpg", None)
        .await
        .unwrap();

    let film_id: (i64,) = sqlx::query_as("INSERT INTO films (slug) VALUES ('f') RETURNING id")
        .fetch_one(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO film_gallery (film_id, media_asset_id, position) VALUES ($1, $2, 0)")
        .bind(film_id.0)
        .bind(linked.id)
        .execute(&pool)
        .await
        .unwrap();
    SiteSettingsRepo::update(
        &pool,
        &UpdateSiteSettings {
            homepage_hero_video_id: Some(hero.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let orphans: Vec<_> = MediaAssetRepo::list_orphans(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(orphans, vec![loose.id]);

    assert!(MediaAssetRepo::unlink(&pool, GalleryOwner::Film(film_id.0), linked.id)
        .await
        .unwrap());
    assert!(MediaAssetRepo::find_by_id(&pool, linked.id).await.unwrap().is_some());

    let mut purged: Vec<_> = MediaAssetRepo::purge_orphans(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    purged.sort();
    assert_eq!(purged, vec![linked.id, loose.id]);
    assert!(MediaAssetRepo::find_by_id(&pool, hero.id).await.unwrap().is_some());
}
