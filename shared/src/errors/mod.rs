//! Shared error response structure for the HTTP boundary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response returned when a request is rejected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }

    /// Whether this response rejects the caller's credentials
    pub fn is_authentication_rejection(&self) -> bool {
        error_codes::AUTHENTICATION.contains(&self.error.as_str())
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const MALFORMED_TOKEN: &str = "MALFORMED_TOKEN";
    pub const SIGNATURE_INVALID: &str = "SIGNATURE_INVALID";
    pub const CLAIM_MISSING: &str = "CLAIM_MISSING";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const CLOCK_UNAVAILABLE: &str = "CLOCK_UNAVAILABLE";
    pub const TOKEN_GENERATION_FAILED: &str = "TOKEN_GENERATION_FAILED";

    /// Codes an HTTP layer answers with an authentication rejection (401)
    pub const AUTHENTICATION: &[&str] = &[
        UNAUTHORIZED,
        MALFORMED_TOKEN,
        SIGNATURE_INVALID,
        CLAIM_MISSING,
        TOKEN_EXPIRED,
        CLOCK_UNAVAILABLE,
    ];
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}
