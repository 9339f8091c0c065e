//! Editor-assist endpoints with a canned text generator, plus the failure
//! paths for unconfigured or misbehaving upstreams.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{body_json, editor_token, post_json, post_json_auth, FakeBackground, FakeStorage};
use studio_api::state::Integrations;
use studio_integrations::IntegrationsConfig;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seo_suggestion(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.app(),
        "/api/v1/ai/seo",
        json!({ "content": "A documentary about the Aegean." }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["title"], "Generated title");
    assert_eq!(data["description"], "Generated description");
    assert_eq!(data["keywords"], "film, studio");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_phrases_default_kind(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.app(),
        "/api/v1/ai/phrases",
        json!({ "content": "We tell stories of light." }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"],
        json!(["Light in motion", "Stories that stay"])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_list_in_answer_is_upstream_error(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    // The canned answer carries phrases but no mottos.
    let response = post_json_auth(
        app.app(),
        "/api/v1/ai/phrases",
        json!({ "content": "We tell stories of light.", "kind": "mottos" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_press_content_draft(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.app(),
        "/api/v1/ai/press-content",
        json!({ "url": "https://news.test/review" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["outlet"], "Film Weekly");
    assert_eq!(data["el"]["title"], "Κριτική");
    assert_eq!(data["en"]["long"], "Long");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_request_validation(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool);

    let blank = post_json_auth(app.app(), "/api/v1/ai/seo", json!({ "content": "  " }), &token).await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let not_http = post_json_auth(
        app.app(),
        "/api/v1/ai/press-content",
        json!({ "url": "ftp://news.test/review" }),
        &token,
    )
    .await;
    assert_eq!(not_http.status(), StatusCode::BAD_REQUEST);

    let anonymous = post_json(app.app(), "/api/v1/ai/seo", json!({ "content": "text" })).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unconfigured_generator_is_upstream_error(pool: PgPool) {
    let token = editor_token(&pool).await;
    let mut integrations = Integrations::from_config(&IntegrationsConfig::default());
    let storage = Arc::new(FakeStorage::default());
    integrations.storage = storage.clone();
    let app =
        common::build_test_app_with(pool, integrations, storage, Arc::new(FakeBackground::default()));

    let response = post_json_auth(
        app.app(),
        "/api/v1/ai/seo",
        json!({ "content": "A documentary about the Aegean." }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UPSTREAM_ERROR");
}
