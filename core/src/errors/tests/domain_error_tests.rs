//! Tests for domain error conversions

use auc_shared::errors::{error_codes, ErrorResponse};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};

use crate::errors::{DomainError, TokenError};

#[test]
fn test_jwt_error_classification() {
    let cases = vec![
        (ErrorKind::InvalidSignature, TokenError::SignatureInvalid),
        (ErrorKind::InvalidAlgorithm, TokenError::SignatureInvalid),
        (ErrorKind::InvalidToken, TokenError::MalformedToken),
        (ErrorKind::MissingAlgorithm, TokenError::MalformedToken),
        (ErrorKind::ExpiredSignature, TokenError::ExpiredToken),
        (
            ErrorKind::MissingRequiredClaim("exp".to_string()),
            TokenError::ClaimMissing {
                claim: "exp".to_string(),
            },
        ),
    ];

    for (kind, expected) in cases {
        let err: JwtError = kind.into();
        assert_eq!(TokenError::from(err), expected);
    }
}

#[test]
fn test_token_error_codes() {
    assert_eq!(TokenError::MalformedToken.error_code(), "MALFORMED_TOKEN");
    assert_eq!(TokenError::SignatureInvalid.error_code(), "SIGNATURE_INVALID");
    assert_eq!(TokenError::ExpiredToken.error_code(), "TOKEN_EXPIRED");
    assert_eq!(
        TokenError::ClaimMissing {
            claim: "role".to_string()
        }
        .error_code(),
        "CLAIM_MISSING"
    );
}

#[test]
fn test_token_error_response_is_rejection() {
    let response: ErrorResponse = TokenError::ClaimMissing {
        claim: "nickname".to_string(),
    }
    .into();

    assert_eq!(response.error, error_codes::CLAIM_MISSING);
    assert!(response.is_authentication_rejection());
    assert_eq!(
        response.details.unwrap()["claim"],
        serde_json::json!("nickname")
    );
}

#[test]
fn test_domain_error_response_mapping() {
    let response: ErrorResponse = DomainError::Token(TokenError::ExpiredToken).into();
    assert_eq!(response.error, error_codes::TOKEN_EXPIRED);

    let response: ErrorResponse = DomainError::Validation {
        message: "subject must not be empty".to_string(),
    }
    .into();
    assert_eq!(response.error, error_codes::VALIDATION_ERROR);
    assert!(!response.is_authentication_rejection());
}

#[test]
fn test_token_error_accessor() {
    let err: DomainError = TokenError::SignatureInvalid.into();
    assert_eq!(err.token_error(), Some(&TokenError::SignatureInvalid));
    assert!(DomainError::Internal {
        message: "boom".to_string()
    }
    .token_error()
    .is_none());
}
