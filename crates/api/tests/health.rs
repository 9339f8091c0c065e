//! `/health`, the JSON fallback and the request-id layers.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database_and_forwarder(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = get(test.app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["status"], "ok");
    assert_eq!(report["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(report["db_healthy"], true);
    // Test apps never start the webhook forwarder.
    assert_eq!(report["revalidation_enabled"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unmatched_paths_get_json_404(pool: PgPool) {
    let test = common::build_test_app(pool);
    for uri in ["/api/v1/screenings", "/films"] {
        let response = get(test.app(), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_id_is_generated_or_echoed(pool: PgPool) {
    let test = common::build_test_app(pool);

    let generated = get(test.app(), "/health").await;
    let id = generated.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36, "uuid expected, got {id}");

    let request = Request::get("/health")
        .header("x-request-id", "dashboard-42")
        .body(Body::empty())
        .unwrap();
    let echoed = test.app().oneshot(request).await.unwrap();
    assert_eq!(echoed.headers()["x-request-id"], "dashboard-42");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_preflight_is_answered(pool: PgPool) {
    let test = common::build_test_app(pool);
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/films/order")
        .header("origin", "http://localhost:3001")
        .header("access-control-request-method", "PUT")
        .header("access-control-request-headers", "authorization,content-type")
        .body(Body::empty())
        .unwrap();
    let response = test.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:3001"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("PUT"), "{methods}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn json_is_gzipped_when_accepted(pool: PgPool) {
    let test = common::build_test_app(pool);
    let request = Request::get("/health")
        .header("accept-encoding", "gzip")
        .header("origin", "http://localhost:3001")
        .body(Body::empty())
        .unwrap();
    let response = test.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-encoding"], "gzip");
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3001"
    );
}
