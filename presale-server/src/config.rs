//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Shop domain this deployment serves; keys the settings and audit rows
    pub shop_domain: String,
    /// Commerce-platform admin GraphQL endpoint
    pub platform_graphql_url: String,
    /// Access token for the platform admin API
    pub platform_access_token: String,
    /// Secret for inbound webhook HMAC verification
    pub webhook_secret: String,
    /// Bearer token for the staff API
    pub staff_api_token: String,
    /// Release batches: continue past transport errors instead of aborting
    pub release_continue_on_error: bool,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            shop_domain: std::env::var("SHOP_DOMAIN").map_err(|_| "SHOP_DOMAIN must be set")?,
            platform_graphql_url: std::env::var("PLATFORM_GRAPHQL_URL")
                .map_err(|_| "PLATFORM_GRAPHQL_URL must be set")?,
            platform_access_token: Self::require_secret("PLATFORM_ACCESS_TOKEN", &environment)?,
            webhook_secret: Self::require_secret("WEBHOOK_SECRET", &environment)?,
            staff_api_token: Self::require_secret("STAFF_API_TOKEN", &environment)?,
            release_continue_on_error: std::env::var("RELEASE_CONTINUE_ON_ERROR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment,
        })
    }
}
