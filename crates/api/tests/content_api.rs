//! Film, press, mission and home page writes through HTTP, and the public
//! projections they feed.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, editor_token, film_payload, get, get_auth, patch_json_auth, post_json_auth,
    put_json_auth, delete_auth,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use studio_core::content::ContentKind;
use studio_events::ContentAction;

async fn create_film(app: &common::TestApp, token: &str, slug: &str, title: &str) -> i64 {
    let response = post_json_auth(app.app(), "/api/v1/films", film_payload(slug, title), token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_press(app: &common::TestApp, token: &str, body: Value) -> i64 {
    let response = post_json_auth(app.app(), "/api/v1/press", body, token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

fn translation<'a>(detail: &'a Value, lang: &str) -> &'a Value {
    detail["translations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["lang"] == lang)
        .unwrap_or_else(|| panic!("missing {lang} translation"))
}

// ---------------------------------------------------------------------------
// Films
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_film_create_fills_every_language_and_publishes_event(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let mut events = app.event_bus.subscribe();

    let body = json!({
        "id": "new",
        "slug": "test-film",
        "published": false,
        "tags": ["drama", "greek"],
        "translations": { "el": { "title": "Τεστ", "logline": "Μια ιστορία" } },
    });
    let response = post_json_auth(app.app(), "/api/v1/films", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await["data"].clone();

    assert_eq!(detail["translations"].as_array().unwrap().len(), 2);
    let el = translation(&detail, "el");
    assert_eq!(el["title"], "Τεστ");
    assert_eq!(el["meta_title"], "Τεστ");
    assert_eq!(el["meta_description"], "Μια ιστορία");
    assert_eq!(el["keywords"], "drama, greek");
    let en = translation(&detail, "en");
    assert_eq!(en["title"], "");

    let event = events.try_recv().expect("upsert publishes an event");
    assert_eq!(event.kind, ContentKind::Film);
    assert_eq!(event.action, ContentAction::Upserted);
    assert!(event.paths().contains(&"/films/test-film".to_string()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_film_missing_default_title_is_rejected(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "slug": "untitled",
        "translations": { "en": { "title": "English only" } },
    });
    let response = post_json_auth(app.app(), "/api/v1/films", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_is_conflict(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);
    create_film(&app, &token, "same-slug", "Πρώτη").await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/films",
        film_payload("same-slug", "Δεύτερη"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_gallery_asset_is_bad_request(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let mut body = film_payload("with-gallery", "Τίτλος");
    body["gallery_ids"] = json!([999_999]);
    let response = post_json_auth(app.app(), "/api/v1/films", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM films")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "failed upsert rolls back the parent insert");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_film_is_not_found(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let mut body = film_payload("ghost", "Φάντασμα");
    body["id"] = json!(424242);
    let response = post_json_auth(app.app(), "/api/v1/films", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_and_partial_list_rejection(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let a = create_film(&app, &token, "a", "Α").await;
    let b = create_film(&app, &token, "b", "Β").await;
    let c = create_film(&app, &token, "c", "Γ").await;

    for ids in [json!([a, b, c]), json!([c, a, b])] {
        let response =
            put_json_auth(app.app(), "/api/v1/films/order", json!({ "ids": ids }), &token).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let partial =
        put_json_auth(app.app(), "/api/v1/films/order", json!({ "ids": [a, b] }), &token).await;
    assert_eq!(partial.status(), StatusCode::BAD_REQUEST);

    let list = body_json(get_auth(app.app(), "/api/v1/films", &token).await).await;
    let order: Vec<(i64, i64)> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["id"].as_i64().unwrap(), f["sort_order"].as_i64().unwrap()))
        .collect();
    assert_eq!(order, vec![(c, 0), (a, 1), (b, 2)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inline_title_edit_and_delete(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = create_film(&app, &token, "editable", "Παλιός").await;

    let response = patch_json_auth(
        app.app(),
        &format!("/api/v1/films/{id}/title"),
        json!({ "title": "Νέος" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let detail = body_json(get_auth(app.app(), &format!("/api/v1/films/{id}"), &token).await).await;
    assert_eq!(translation(&detail["data"], "el")["title"], "Νέος");

    let response = delete_auth(app.app(), &format!("/api/v1/films/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app.app(), &format!("/api/v1/films/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Press
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_press_seo_fill_and_generated_slug(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let id = create_press(
        &app,
        &token,
        json!({
            "kind": "NEWS",
            "outlet": "Athens Voice",
            "translations": { "el": { "title": "X" } },
        }),
    )
    .await;

    let detail = body_json(get_auth(app.app(), &format!("/api/v1/press/{id}"), &token).await).await;
    let data = &detail["data"];
    assert_eq!(data["slug"], "x");
    let el = translation(data, "el");
    assert_eq!(el["meta_title"], "X");
    assert_eq!(el["keywords"], "Athens Voice, NEWS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_screenshot_becomes_main_image(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = create_press(
        &app,
        &token,
        json!({
            "kind": "REVIEW",
            "outlet": "Film Weekly",
            "url": "https://news.test/review",
            "translations": { "el": { "title": "Κριτική" } },
        }),
    )
    .await;

    let response = common::post_auth(app.app(), &format!("/api/v1/press/{id}/screenshot"), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let asset = body_json(response).await["data"].clone();
    assert_eq!(asset["alt"], "Screenshot of https://news.test/review");

    let puts = app.storage.puts.lock().unwrap().clone();
    assert_eq!(puts.len(), 1);
    assert!(puts[0].0.starts_with(&format!("press-screenshots/{id}-")));
    assert_eq!(puts[0].2, "image/jpeg");

    let detail = body_json(get_auth(app.app(), &format!("/api/v1/press/{id}"), &token).await).await;
    assert_eq!(detail["data"]["image_id"], asset["id"]);
    assert_eq!(detail["data"]["gallery"][0]["id"], asset["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_screenshot_without_url_is_rejected(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = create_press(
        &app,
        &token,
        json!({ "kind": "NEWS", "translations": { "el": { "title": "Χωρίς σύνδεσμο" } } }),
    )
    .await;

    let response = common::post_auth(app.app(), &format!("/api/v1/press/{id}/screenshot"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.storage.puts.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Home page
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_featured_cap_rejected_without_side_effects(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(create_film(&app, &token, &format!("film-{i}"), &format!("Ταινία {i}")).await);
    }

    let ok = put_json_auth(
        app.app(),
        "/api/v1/home",
        json!({ "featured_film_ids": &ids[..2] }),
        &token,
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);

    let too_many = put_json_auth(
        app.app(),
        "/api/v1/home",
        json!({ "featured_film_ids": ids, "translations": { "el": { "title": "Αλλαγή" } } }),
        &token,
    )
    .await;
    assert_eq!(too_many.status(), StatusCode::BAD_REQUEST);

    let home = body_json(get_auth(app.app(), "/api/v1/home", &token).await).await;
    assert_eq!(home["data"]["featured_film_ids"], json!(&ids[..2]));
    assert_eq!(translation(&home["data"], "el")["title"], "");
}

// ---------------------------------------------------------------------------
// Public projections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_reads_resolve_language_and_hide_drafts(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "slug": "bilingual",
        "published": true,
        "translations": {
            "el": { "title": "Δίγλωσση" },
            "en": { "title": "Bilingual" },
        },
    });
    post_json_auth(app.app(), "/api/v1/films", body, &token).await;
    let mut draft = film_payload("draft", "Πρόχειρο");
    draft["published"] = json!(false);
    post_json_auth(app.app(), "/api/v1/films", draft, &token).await;

    let en = body_json(get(app.app(), "/api/v1/public/films?lang=en").await).await;
    let films = en["data"].as_array().unwrap();
    assert_eq!(films.len(), 1);
    assert_eq!(films[0]["title"], "Bilingual");
    assert_eq!(films[0]["lang"], "en");

    // Unsupported languages fall back to Greek.
    let fr = body_json(get(app.app(), "/api/v1/public/films/bilingual?lang=fr").await).await;
    assert_eq!(fr["data"]["title"], "Δίγλωσση");
    assert!(fr["data"]["gallery"].as_array().unwrap().is_empty());

    let hidden = get(app.app(), "/api/v1/public/films/draft").await;
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_home_lists_featured_in_order(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let first = create_film(&app, &token, "first", "Πρώτη").await;
    let second = create_film(&app, &token, "second", "Δεύτερη").await;

    put_json_auth(
        app.app(),
        "/api/v1/home",
        json!({
            "featured_film_ids": [second, first],
            "translations": { "el": { "title": "Καλώς ήρθατε", "hero_text": "Ιστορίες" } },
        }),
        &token,
    )
    .await;

    let home = body_json(get(app.app(), "/api/v1/public/home?lang=en").await).await;
    let data = &home["data"];
    assert_eq!(data["title"], "");
    let featured: Vec<i64> = data["featured_films"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_i64().unwrap())
        .collect();
    assert_eq!(featured, vec![second, first]);

    let settings = get(app.app(), "/api/v1/public/settings").await;
    assert_eq!(settings.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Missions and settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mission_upsert_keeps_phrase_lists(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "slug": "our-vision",
        "published": true,
        "translations": {
            "el": {
                "title": "Όραμα",
                "short_description": "Ιστορίες από την Ελλάδα",
                "phrases": ["Φως", "Κίνηση"],
            },
        },
    });
    let response = post_json_auth(app.app(), "/api/v1/missions", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let detail =
        body_json(get_auth(app.app(), &format!("/api/v1/missions/{id}"), &token).await).await;
    let el = translation(&detail["data"], "el");
    assert_eq!(el["phrases"], json!(["Φως", "Κίνηση"]));
    assert_eq!(el["meta_description"], "Ιστορίες από την Ελλάδα");

    let public = body_json(get(app.app(), "/api/v1/public/missions").await).await;
    assert_eq!(public["data"][0]["title"], "Όραμα");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_partial_update(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);
    let mut events = app.event_bus.subscribe();

    put_json_auth(
        app.app(),
        "/api/v1/settings",
        json!({ "site_title": "Studio", "contact_email": "hello@studio.test" }),
        &token,
    )
    .await;
    let response = put_json_auth(
        app.app(),
        "/api/v1/settings",
        json!({ "social_vimeo": "https://vimeo.com/studio" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let settings = body_json(get(app.app(), "/api/v1/public/settings").await).await;
    assert_eq!(settings["data"]["site_title"], "Studio");
    assert_eq!(settings["data"]["social_vimeo"], "https://vimeo.com/studio");

    let event = events.try_recv().expect("settings update publishes an event");
    assert_eq!(event.kind, ContentKind::SiteSettings);
}
