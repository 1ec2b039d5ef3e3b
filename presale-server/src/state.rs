//! Application state for presale-server

use sqlx::PgPool;

use crate::config::Config;
use crate::platform::PlatformClient;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Commerce-platform admin API client
    pub platform: PlatformClient,
    /// Shop domain keying the settings and audit rows
    pub shop: String,
    /// Webhook HMAC secret
    pub webhook_secret: String,
    /// Staff API bearer token
    pub staff_api_token: String,
    /// Release batches: continue past transport errors instead of aborting
    pub release_continue_on_error: bool,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let platform = PlatformClient::new(
            &config.platform_graphql_url,
            &config.platform_access_token,
        )?;

        Ok(Self {
            pool,
            platform,
            shop: config.shop_domain.clone(),
            webhook_secret: config.webhook_secret.clone(),
            staff_api_token: config.staff_api_token.clone(),
            release_continue_on_error: config.release_continue_on_error,
        })
    }
}
