//! End-to-end flow: configuration, issuance, event delivery and request authentication

use std::sync::Arc;

use auc_core::domain::entities::{Role, UserIdentity, TOKEN_ISSUED};
use auc_core::errors::TokenError;
use auc_core::messaging::{BroadcastEventPublisher, AUTH_TOKEN_TOPIC};
use auc_core::services::token::{resolve_bearer_token, TokenService, TokenServiceConfig};
use auc_shared::config::{AppConfig, JwtConfig};
use auc_shared::errors::{error_codes, ErrorResponse};

const SECRET: &str = "integration-secret-with-at-least-32-bytes";

#[test]
fn test_service_from_application_config() {
    let mut config = AppConfig::development();
    config.auth.jwt = JwtConfig::new(SECRET).with_expiry_hours(2);
    config.validate().unwrap();

    let service = TokenService::from_jwt_config(&config.auth.jwt).unwrap();
    let identity = UserIdentity::new("bob@example.com", "bob");
    let token = service.issue_for_user(&identity).unwrap();

    let claims = service.parse_claims(&token).unwrap();
    assert_eq!(claims.exp - claims.iat, 2 * 60 * 60);
    assert_eq!(claims.role(), Some(Role::User.authority()));
}

#[tokio::test]
async fn test_issue_broadcasts_token_issued_event() {
    let publisher = Arc::new(BroadcastEventPublisher::new(16));
    let mut events = publisher.subscribe();
    let service =
        TokenService::with_publisher(TokenServiceConfig::new(SECRET), publisher.clone()).unwrap();

    let identity = UserIdentity::new("alice@example.com", "alice").with_role(Role::Admin);
    let token = service.issue_for_user(&identity).unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(event.topic, AUTH_TOKEN_TOPIC);
    assert_eq!(event.payload.event_type, TOKEN_ISSUED);
    assert_eq!(event.payload.sender.as_deref(), Some("alice@example.com"));
    assert_eq!(event.payload.data["userUUID"], identity.user_uuid.as_str());

    let claims = service.parse_claims(&token).unwrap();
    assert_eq!(event.payload.data["jti"], claims.jti.unwrap().as_str());
}

#[test]
fn test_issue_succeeds_without_subscribers() {
    let publisher = Arc::new(BroadcastEventPublisher::default());
    let service = TokenService::with_publisher(TokenServiceConfig::new(SECRET), publisher).unwrap();

    let token = service
        .issue_for_user(&UserIdentity::new("bob@example.com", "bob"))
        .unwrap();
    assert!(service.validate(&token));
}

#[test]
fn test_authenticate_from_authorization_header() {
    let service = TokenService::new(TokenServiceConfig::new(SECRET)).unwrap();
    let identity = UserIdentity::new("bob@example.com", "bob");
    let token = service.issue_for_user(&identity).unwrap();

    let header = format!("Bearer {}", token);
    let extracted = resolve_bearer_token(Some(&header)).unwrap();
    let user = service.authenticate(extracted).unwrap();

    assert_eq!(user.email, "bob@example.com");
    assert_eq!(user.user_uuid, identity.user_uuid);
    assert_eq!(user.role(), Some(Role::User));
    assert!(!user.is_admin());

    assert!(resolve_bearer_token(Some("Bearer ")).is_none());
    assert!(resolve_bearer_token(None).is_none());
}

#[test]
fn test_rejection_maps_to_authentication_response() {
    let issuer = TokenService::new(TokenServiceConfig::new(SECRET)).unwrap();
    let verifier =
        TokenService::new(TokenServiceConfig::new("a-different-secret-of-sufficient-size")).unwrap();
    let token = issuer
        .issue_for_user(&UserIdentity::new("bob@example.com", "bob"))
        .unwrap();

    let err = verifier.authenticate(&token).unwrap_err();
    assert_eq!(err.token_error(), Some(&TokenError::SignatureInvalid));

    let response = ErrorResponse::from(err);
    assert_eq!(response.error, error_codes::SIGNATURE_INVALID);
    assert!(response.is_authentication_rejection());
}
