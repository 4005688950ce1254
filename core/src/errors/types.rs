//! Token error taxonomy shared by issuance and verification.

use auc_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Token-related errors
///
/// Every verification failure lands in exactly one of these variants so callers
/// (and logs) can tell a forged token from an expired one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Wrong segment structure or undecodable base64url/JSON
    #[error("Token is malformed")]
    MalformedToken,

    /// Signature does not verify under the current key and algorithm
    #[error("Token signature verification failed")]
    SignatureInvalid,

    #[error("Missing required claim: {claim}")]
    ClaimMissing { claim: String },

    #[error("Token expired")]
    ExpiredToken,

    /// The wall clock could not be read, so expiry cannot be decided
    #[error("Clock unavailable for token verification")]
    ClockUnavailable,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable code for logs and API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::MalformedToken => error_codes::MALFORMED_TOKEN,
            TokenError::SignatureInvalid => error_codes::SIGNATURE_INVALID,
            TokenError::ClaimMissing { .. } => error_codes::CLAIM_MISSING,
            TokenError::ExpiredToken => error_codes::TOKEN_EXPIRED,
            TokenError::ClockUnavailable => error_codes::CLOCK_UNAVAILABLE,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
        }
    }

    pub(crate) fn missing(claim: &str) -> Self {
        TokenError::ClaimMissing {
            claim: claim.to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::SignatureInvalid,
            ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
            ErrorKind::MissingRequiredClaim(claim) => TokenError::missing(claim),
            ErrorKind::InvalidToken
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenError::MalformedToken,
            _ => TokenError::SignatureInvalid,
        }
    }
}

impl IntoErrorResponse for TokenError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_code(), self.to_string());
        match self {
            TokenError::ClaimMissing { claim } => response.add_detail("claim", claim),
            _ => response,
        }
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        err.to_error_response()
    }
}
