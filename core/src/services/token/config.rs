//! Configuration for the token service

use auc_shared::config::{
    JwtConfig, DEFAULT_TOKEN_EXPIRY_SECONDS, MAX_TOKEN_EXPIRY_SECONDS, MIN_SECRET_BYTES,
};
use chrono::Duration;

use crate::errors::DomainError;
use crate::messaging::AUTH_TOKEN_TOPIC;

/// Configuration for the token service
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_expiry_seconds: i64,
    /// Topic for token lifecycle events
    pub event_topic: String,
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_expiry_seconds", &self.token_expiry_seconds)
            .field("event_topic", &self.event_topic)
            .finish()
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            token_expiry_seconds: config.token_expiry,
            event_topic: AUTH_TOKEN_TOPIC.to_string(),
        }
    }
}

impl TokenServiceConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_expiry_seconds: DEFAULT_TOKEN_EXPIRY_SECONDS,
            event_topic: AUTH_TOKEN_TOPIC.to_string(),
        }
    }

    pub fn with_expiry_seconds(mut self, seconds: i64) -> Self {
        self.token_expiry_seconds = seconds;
        self
    }

    /// Lifetime clamped to the accepted range; `validate` rejects anything outside it
    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.token_expiry_seconds.clamp(0, MAX_TOKEN_EXPIRY_SECONDS))
    }

    /// Reject secrets shorter than an HS256 key and lifetimes outside one second to one year
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(DomainError::Configuration {
                message: format!(
                    "JWT secret must be at least {} bytes, got {}",
                    MIN_SECRET_BYTES,
                    self.jwt_secret.len()
                ),
            });
        }
        if !(1..=MAX_TOKEN_EXPIRY_SECONDS).contains(&self.token_expiry_seconds) {
            return Err(DomainError::Configuration {
                message: format!(
                    "Token expiry must be between 1 and {} seconds, got {}",
                    MAX_TOKEN_EXPIRY_SECONDS, self.token_expiry_seconds
                ),
            });
        }
        Ok(())
    }
}
