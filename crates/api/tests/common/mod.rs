#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use studio_api::auth::jwt::{issue_session_token, JwtConfig};
use studio_api::auth::password::hash_password;
use studio_api::config::{LicenseInfo, ServerConfig};
use studio_api::router::build_app_router;
use studio_api::state::{AppState, Integrations};
use studio_db::models::user::NewUser;
use studio_db::repositories::UserRepo;
use studio_events::InvalidationBus;
use studio_integrations::{
    BackgroundRemover, Fetcher, IntegrationError, ObjectStorage, ScreenshotProvider, TextGenerator,
};

pub const TEST_PASSWORD: &str = "test-password-123";
pub const FAKE_CDN: &str = "https://cdn.test";
pub const FAKE_PROCESSED_URL: &str = "https://tmp.test/processed.png";

// ---------------------------------------------------------------------------
// Fake integrations
// ---------------------------------------------------------------------------

/// Records every stored object and serves it from [`FAKE_CDN`].
#[derive(Default)]
pub struct FakeStorage {
    pub puts: Mutex<Vec<(String, usize, String)>>,
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, IntegrationError> {
        self.puts
            .lock()
            .unwrap()
            .push((path.to_string(), bytes.len(), content_type.to_string()));
        Ok(format!("{FAKE_CDN}/{path}"))
    }
}

/// Answers every prompt with the same JSON object.
pub struct FakeText(pub Value);

#[async_trait]
impl TextGenerator for FakeText {
    async fn generate_json(&self, _system: &str, _user: &str) -> Result<Value, IntegrationError> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub struct FakeBackground {
    pub inputs: Mutex<Vec<String>>,
}

#[async_trait]
impl BackgroundRemover for FakeBackground {
    async fn remove_background(&self, url: &str) -> Result<String, IntegrationError> {
        self.inputs.lock().unwrap().push(url.to_string());
        Ok(FAKE_PROCESSED_URL.to_string())
    }
}

pub struct FakeScreenshots;

#[async_trait]
impl ScreenshotProvider for FakeScreenshots {
    async fn capture(&self, _url: &str) -> Result<Vec<u8>, IntegrationError> {
        Ok(vec![0xFF, 0xD8, 0xFF, 0xE0])
    }
}

pub struct FakeFetcher;

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch_bytes(&self, _url: &str) -> Result<Vec<u8>, IntegrationError> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn fetch_text(&self, _url: &str) -> Result<String, IntegrationError> {
        Ok("<html><body><h1>Review</h1><p>A remarkable film.</p></body></html>".to_string())
    }
}

/// Background removal that always fails, to prove nothing is mutated.
pub struct FailingBackground;

#[async_trait]
impl BackgroundRemover for FailingBackground {
    async fn remove_background(&self, _url: &str) -> Result<String, IntegrationError> {
        Err(IntegrationError::Api {
            service: "Background removal",
            status: 500,
            body: "boom".into(),
        })
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        revalidate_webhook_url: None,
        license: LicenseInfo {
            serial: Some("SN-0001".into()),
            ..LicenseInfo::default()
        },
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub event_bus: Arc<InvalidationBus>,
    pub storage: Arc<FakeStorage>,
    pub background: Arc<FakeBackground>,
}

impl TestApp {
    /// A fresh clone of the router for one request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

pub fn fake_text_answer() -> Value {
    json!({
        "title": "Generated title",
        "description": "Generated description",
        "keywords": "film, studio",
        "phrases": ["Light in motion", "Stories that stay"],
        "el": { "title": "Κριτική", "short": "Σύντομο", "long": "Μακρύ" },
        "en": { "title": "Review", "short": "Short", "long": "Long" },
        "outlet": "Film Weekly",
    })
}

/// Build the full application router backed by fake integrations.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let storage = Arc::new(FakeStorage::default());
    let background = Arc::new(FakeBackground::default());
    let integrations = Integrations {
        storage: storage.clone(),
        text: Arc::new(FakeText(fake_text_answer())),
        background: background.clone(),
        screenshots: Arc::new(FakeScreenshots),
        fetcher: Arc::new(FakeFetcher),
    };
    build_test_app_with(pool, integrations, storage, background)
}

pub fn build_test_app_with(
    pool: PgPool,
    integrations: Integrations,
    storage: Arc<FakeStorage>,
    background: Arc<FakeBackground>,
) -> TestApp {
    let config = test_config();
    let event_bus = Arc::new(InvalidationBus::default());
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        integrations,
    };
    TestApp {
        router: build_app_router(state, &config),
        pool,
        event_bus,
        storage,
        background,
    }
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Insert a user with the given role and return a bearer token for it.
pub async fn token_for_role(pool: &PgPool, role: &str) -> String {
    let email = format!("{}@studio.test", role.to_lowercase());
    let hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let new = NewUser {
        email: &email,
        password_hash: &hash,
        name: None,
        role,
    };
    let user = UserRepo::create(pool, new)
        .await
        .expect("user creation should succeed");
    issue_session_token(user.id, &user.role, &test_config().jwt)
        .expect("token generation should succeed")
        .token
}

pub async fn editor_token(pool: &PgPool) -> String {
    token_for_role(pool, "EDITOR").await
}

pub async fn admin_token(pool: &PgPool) -> String {
    token_for_role(pool, "ADMIN").await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Minimal valid film payload.
pub fn film_payload(slug: &str, el_title: &str) -> Value {
    json!({
        "id": "new",
        "slug": slug,
        "published": true,
        "translations": { "el": { "title": el_title } },
    })
}
