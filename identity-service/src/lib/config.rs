use std::env;

use auth::SecretError;
use auth::SecretPolicy;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub environment: String,
}

const LOCAL_ENVIRONMENTS: [&str; 4] = ["development", "dev", "local", "test"];

impl AppConfig {
    /// Whether this is a developer machine. Every other environment name,
    /// including unrecognised ones, gets the strict secret policy.
    pub fn is_local(&self) -> bool {
        LOCAL_ENVIRONMENTS
            .iter()
            .any(|local| self.environment.eq_ignore_ascii_case(local))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("Refusing to start with an insecure JWT secret: {0}")]
    InsecureSecret(#[from] SecretError),

    #[error("JWT expiration must be positive, got {0} hours")]
    InvalidExpiration(i64),
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load_for(&run_mode)
    }

    /// Load configuration for an explicit run mode.
    ///
    /// `app.environment` defaults to the run mode unless a file or variable sets it.
    pub fn load_for(run_mode: &str) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .set_default("app.environment", run_mode)?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.expiration_hours", 24)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Check settings that deserialize fine but are unsafe to run with.
    ///
    /// A weak JWT secret stops startup everywhere except local environments,
    /// where it is only logged as a warning.
    ///
    /// # Errors
    /// * `InsecureSecret` - Non-local environment with an empty, placeholder, or short secret
    /// * `InvalidExpiration` - Non-positive token lifetime
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigValidationError::InvalidExpiration(
                self.jwt.expiration_hours,
            ));
        }

        if let Err(e) = SecretPolicy::default().check(&self.jwt.secret) {
            if !self.app.is_local() {
                return Err(e.into());
            }
            tracing::warn!(
                environment = %self.app.environment,
                reason = %e,
                "Insecure JWT secret; this would be rejected outside local environments"
            );
        }

        Ok(())
    }

    pub fn token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::hours(self.jwt.expiration_hours)
    }
}
