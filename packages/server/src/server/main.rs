// Main entry point for the API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use extension_relay::{RelayOptions, RelayService};
use server_core::domains::posts::actions;
use server_core::server::{build_app, AppState};
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Reachline post pipeline API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Extension relay client
    let relay = Arc::new(RelayService::new(RelayOptions {
        base_url: config.relay_base_url.clone(),
        api_key: config.relay_api_key.clone(),
    }));

    // Background sweep moving due scheduled posts into the extension queue
    let dispatch_pool = pool.clone();
    let dispatch_relay = relay.clone();
    let dispatch_interval = config.dispatch_interval_secs;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(dispatch_interval));
        loop {
            interval.tick().await;
            if let Err(e) = actions::dispatch_due_posts(&dispatch_pool, dispatch_relay.clone()).await
            {
                tracing::error!(error = %e, "Due-post dispatch sweep failed");
            }
        }
    });

    // Build application
    let app = build_app(AppState {
        db_pool: pool,
        relay,
    });

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
