//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Secret used when nothing else is configured. Only suitable for local development.
pub const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// Default session token lifetime: 24 hours
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Longest accepted token lifetime: one year
pub const MAX_TOKEN_EXPIRY_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Minimum signing secret length in bytes (HS256 key size)
pub const MIN_SECRET_BYTES: usize = 32;

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used to sign and verify tokens
    pub secret: String,

    /// Token lifetime in seconds
    #[serde(default = "default_token_expiry")]
    pub token_expiry: i64,

    /// Algorithm for JWT signing (only HS256 is supported)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            token_expiry: default_token_expiry(),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token expiry in hours
    pub fn with_expiry_hours(mut self, hours: i64) -> Self {
        self.token_expiry = hours.saturating_mul(3600);
        self
    }

    /// Set token expiry in seconds
    pub fn with_expiry_seconds(mut self, seconds: i64) -> Self {
        self.token_expiry = seconds;
        self
    }

    /// Check if using the development secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }

    /// Check the values a token service can be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Invalid {
                field: "auth.jwt.secret".to_string(),
                reason: format!(
                    "must be at least {} bytes, got {}",
                    MIN_SECRET_BYTES,
                    self.secret.len()
                ),
            });
        }
        if !(1..=MAX_TOKEN_EXPIRY_SECONDS).contains(&self.token_expiry) {
            return Err(ConfigError::Invalid {
                field: "auth.jwt.token_expiry".to_string(),
                reason: format!(
                    "must be between 1 and {} seconds, got {}",
                    MAX_TOKEN_EXPIRY_SECONDS, self.token_expiry
                ),
            });
        }
        if !self.algorithm.eq_ignore_ascii_case("HS256") {
            return Err(ConfigError::Invalid {
                field: "auth.jwt.algorithm".to_string(),
                reason: format!("unsupported algorithm {}", self.algorithm),
            });
        }
        Ok(())
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| String::from(DEVELOPMENT_SECRET));
        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRY_SECONDS);

        Self {
            jwt: JwtConfig {
                secret,
                token_expiry,
                algorithm: default_algorithm(),
            },
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }

    /// Get token expiry in seconds
    pub fn token_expiry_seconds(&self) -> i64 {
        self.jwt.token_expiry
    }
}

fn default_token_expiry() -> i64 {
    DEFAULT_TOKEN_EXPIRY_SECONDS
}

fn default_algorithm() -> String {
    String::from("HS256")
}
