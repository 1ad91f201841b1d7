//! Web Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are
//! `auth::AuthError`, rendered through `kernel::error::AppError`.

mod config;

use std::time::Duration;

use auth::{GoogleIdentityProvider, PgAuthRepository, auth_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

/// How often expired sessions and pending sign-ins are swept
const SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(settings.database)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_store = PgAuthRepository::new(pool.clone());

    // Startup cleanup: errors here should not prevent server startup
    sweep_expired(&auth_store).await;
    spawn_sweeper(auth_store.clone());

    let provider = GoogleIdentityProvider::new(settings.google)?;

    tracing::info!(
        cookie_secure = settings.auth.cookie_secure,
        session_ttl_secs = settings.auth.session_ttl.as_secs(),
        "Auth configured"
    );

    // Build router
    let app = auth_router(auth_store, provider, settings.auth)?.layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Listening on {}", settings.bind_addr);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn sweep_expired(store: &PgAuthRepository) {
    match store.cleanup_expired().await {
        Ok((sessions, states)) => {
            tracing::info!(
                sessions_deleted = sessions,
                states_deleted = states,
                "Auth cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth cleanup failed, continuing anyway");
        }
    }
}

fn spawn_sweeper(store: PgAuthRepository) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        // The first tick completes immediately; startup already swept.
        interval.tick().await;
        loop {
            interval.tick().await;
            sweep_expired(&store).await;
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutting down");
}
