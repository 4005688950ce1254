//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::TokenError;

use auc_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// The token error behind this error, if any
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(err) => Some(err),
            _ => None,
        }
    }
}

impl From<auc_shared::ConfigError> for DomainError {
    fn from(err: auc_shared::ConfigError) -> Self {
        DomainError::Configuration {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Token(token_err) => token_err.into(),
            DomainError::Validation { .. } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string())
            }
            DomainError::Configuration { .. } | DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, err.to_string())
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
