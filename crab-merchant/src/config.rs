//! Merchant service configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEVELOPMENT: &str = "development";

/// Merchant service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// PostgreSQL connection URL; `None` selects the in-memory gateway (development only)
    pub database_url: Option<String>,
    /// PostgreSQL pool size
    pub database_max_connections: u32,
    /// JWT secret shared with the token issuer
    pub jwt_secret: String,
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Directory for daily rolling log files
    pub log_dir: Option<String>,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Seed merchant 1 into the in-memory gateway
    pub seed_demo_merchant: bool,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != DEVELOPMENT {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != DEVELOPMENT {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn flag(name: &str) -> bool {
        std::env::var(name)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| DEVELOPMENT.into());

        let database_url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if database_url.is_none() && environment != DEVELOPMENT {
            return Err(format!("DATABASE_URL must be set in {environment} environment").into());
        }

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url,
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(10),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            log_json: Self::flag("LOG_JSON"),
            seed_demo_merchant: Self::flag("SEED_DEMO_MERCHANT"),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == DEVELOPMENT
    }
}
