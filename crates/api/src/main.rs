//! `studio-api` binary: loads configuration, prepares Postgres, starts the
//! revalidation forwarder and serves the dashboard and public APIs.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use studio_api::auth::password::hash_password;
use studio_api::config::ServerConfig;
use studio_api::router::build_app_router;
use studio_api::state::{AppState, Integrations};
use studio_db::repositories::UserRepo;
use studio_db::DbPool;
use studio_events::{InvalidationBus, RevalidationForwarder};
use studio_integrations::IntegrationsConfig;

const DEFAULT_LOG_FILTER: &str = "studio_api=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let integrations = IntegrationsConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        storage = integrations.bunny.is_some(),
        text_generation = integrations.deepseek_api_key.is_some(),
        background_removal = integrations.claid_api_key.is_some(),
        screenshots = integrations.screenshot_access_key.is_some(),
        "Configuration loaded"
    );

    let pool = prepare_database().await;
    bootstrap_admin(&pool).await;

    let event_bus = Arc::new(InvalidationBus::default());
    let forwarder = spawn_forwarder(&config, &event_bus);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        integrations: Integrations::from_config(&integrations),
    };
    let app = build_app_router(state, &config);

    let ip = config.host.parse().expect("HOST must be an IP address");
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // The router has been dropped with its state; releasing the last bus
    // handle closes the channel, so the forwarder drains and returns.
    drop(event_bus);
    if let Some(handle) = forwarder {
        let grace = Duration::from_secs(config.shutdown_timeout_secs);
        match tokio::time::timeout(grace, handle).await {
            Ok(_) => tracing::info!("Revalidation forwarder drained"),
            Err(_) => tracing::warn!("Revalidation forwarder did not drain in time"),
        }
    }
    tracing::info!("Shutdown complete");
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify the connection and apply pending migrations. Startup
/// aborts on any failure.
async fn prepare_database() -> DbPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = studio_db::create_pool(&url)
        .await
        .expect("Failed to connect to Postgres");
    studio_db::health_check(&pool)
        .await
        .expect("Postgres did not answer the health query");
    studio_db::run_migrations(&pool)
        .await
        .expect("Failed to apply migrations");
    tracing::info!("Database ready");
    pool
}

/// Forward content events to the site when `REVALIDATE_WEBHOOK_URL` is set.
fn spawn_forwarder(config: &ServerConfig, bus: &InvalidationBus) -> Option<JoinHandle<()>> {
    let Some(url) = &config.revalidate_webhook_url else {
        tracing::info!("REVALIDATE_WEBHOOK_URL not set; content events stay in-process");
        return None;
    };
    let forwarder =
        RevalidationForwarder::new(url.clone()).expect("Failed to build revalidation client");
    tracing::info!(%url, "Forwarding content events for revalidation");
    Some(tokio::spawn(forwarder.run(bus.subscribe())))
}

/// Create or reset the administrator from `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
/// Skipped when either is unset.
async fn bootstrap_admin(pool: &DbPool) {
    let (Ok(email), Ok(password)) = (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD"))
    else {
        tracing::info!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin bootstrap");
        return;
    };

    let hash = hash_password(&password).expect("ADMIN_PASSWORD is not a usable password");
    let admin = UserRepo::upsert_admin(pool, email.trim(), &hash)
        .await
        .expect("Failed to bootstrap admin user");
    tracing::info!(user_id = admin.id, email = %admin.email, "Admin user ensured");
}

/// Resolve on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("SIGINT received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
