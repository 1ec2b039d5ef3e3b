//! presale-server: pre-sale fulfillment hold automation
//!
//! Long-running service that:
//! - Holds fulfillment on new orders placed against the configured pre-sale location (webhook)
//! - Lists orders currently held at that location
//! - Releases holds on demand, splitting partially in-stock orders so available items ship
//! - Keeps a per-shop audit log of settings changes and releases

mod api;
mod config;
mod db;
mod error;
mod holds;
mod platform;
mod state;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "presale_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting presale-server (env: {})", config.environment);

    // Initialize application state
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("presale-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
