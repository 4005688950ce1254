//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Session token signing configuration
//! - `environment` - Environment detection and logging configuration
//!
//! Values are read once at startup. [`AppConfig::load`] layers an optional
//! `config.<environment>.toml` file and `APP__`-prefixed environment variables
//! (for example `APP__AUTH__JWT__SECRET`) on top of the defaults.

pub mod auth;
pub mod environment;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{
    AuthConfig, JwtConfig, DEFAULT_TOKEN_EXPIRY_SECONDS, MAX_TOKEN_EXPIRY_SECONDS, MIN_SECRET_BYTES,
};
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Errors raised while loading or checking configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            auth: AuthConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            auth: AuthConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    ///
    /// The secret still has to come from the environment.
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            auth: AuthConfig {
                jwt: JwtConfig::new("use-env-variable"),
            },
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from plain environment variables
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Production => Self::production(),
            _ => Self::development(),
        };
        config.environment = env;
        config.logging = LoggingConfig::for_environment(env);
        config.auth = AuthConfig::from_env();
        config
    }

    /// Load configuration from `.env` files, the environment's TOML file and
    /// `APP__` environment variables, then validate it.
    ///
    /// `JWT_SECRET` and `JWT_TOKEN_EXPIRY` seed the defaults, so the TOML file
    /// and `APP__AUTH__JWT__*` variables take precedence over them.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = Environment::from_env();
        dotenvy::from_filename(env.env_file()).ok();

        let seed = AuthConfig::from_env();
        let settings = config::Config::builder()
            .set_default("auth.jwt.secret", seed.jwt.secret)?
            .set_default("auth.jwt.token_expiry", seed.jwt.token_expiry)?
            .add_source(config::File::with_name(&env.config_file()).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let logging = settings.get::<LoggingConfig>("logging").ok();
        let mut loaded: AppConfig = settings.try_deserialize()?;
        loaded.environment = env;
        loaded.logging = logging.unwrap_or_else(|| LoggingConfig::for_environment(env));

        loaded.validate()?;
        tracing::debug!(
            environment = %loaded.environment,
            token_expiry = loaded.auth.jwt.token_expiry,
            event = "config_loaded",
            "Configuration loaded"
        );
        Ok(loaded)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid {
                field: "auth.jwt.secret".to_string(),
                reason: "the development secret cannot be used in production".to_string(),
            });
        }
        self.auth.jwt.validate()
    }
}
