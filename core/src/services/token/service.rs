//! Main token service implementation

use std::sync::Arc;

use auc_shared::config::JwtConfig;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::{
    AuthenticatedUser, Claims, CustomClaims, MessagePayload, UserIdentity, CLAIM_EXPIRES_AT,
    CLAIM_SUBJECT,
};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::messaging::{EventPublisher, NoOpEventPublisher, PublishError};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// Outcome of verifying a token
///
/// Keeps the failure reason for internal callers; [`TokenService::validate`]
/// collapses it to a boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    Valid(Claims),
    Invalid(TokenError),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid(_))
    }

    /// The rejection reason, if any
    pub fn reason(&self) -> Option<&TokenError> {
        match self {
            Verification::Valid(_) => None,
            Verification::Invalid(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<Claims, TokenError> {
        match self {
            Verification::Valid(claims) => Ok(claims),
            Verification::Invalid(err) => Err(err),
        }
    }
}

/// Service for issuing and verifying signed session tokens
///
/// Holds the signing key for its whole lifetime and never mutates it, so a
/// single instance can be shared across threads without locking.
pub struct TokenService<P: EventPublisher = NoOpEventPublisher> {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
    publisher: Arc<P>,
}

impl TokenService<NoOpEventPublisher> {
    /// Creates a token service that publishes no events
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance or a configuration error if the secret is too short
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        Self::with_publisher(config, Arc::new(NoOpEventPublisher))
    }

    /// Creates a token service from the shared JWT configuration
    pub fn from_jwt_config(config: &JwtConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Self::new(TokenServiceConfig::from(config))
    }
}

impl<P: EventPublisher> TokenService<P> {
    /// Creates a token service that reports issuance to `publisher`
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    /// * `publisher` - Messaging collaborator for auth events
    pub fn with_publisher(config: TokenServiceConfig, publisher: Arc<P>) -> Result<Self, DomainError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Only HS256 headers are accepted. Expiry is checked against the
        // service clock after decoding, with no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&[CLAIM_SUBJECT, CLAIM_EXPIRES_AT]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock: Arc::new(SystemClock),
            publisher,
        })
    }

    /// Replaces the clock used for issuance and expiry checks
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Lifetime of every issued token
    pub fn token_ttl(&self) -> Duration {
        self.config.token_ttl()
    }

    /// Issues a signed token for `subject` carrying `claims`
    ///
    /// # Arguments
    ///
    /// * `claims` - Extra claims (may be empty)
    /// * `subject` - The user's stable identity, must not be blank
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact `header.payload.signature` token
    /// * `Err(DomainError)` - Blank subject, unreadable clock or encoding failure
    pub fn issue(&self, claims: CustomClaims, subject: &str) -> DomainResult<String> {
        if subject.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Token subject must not be empty".to_string(),
            });
        }

        let now = self.clock.now().ok_or(TokenError::ClockUnavailable)?;
        let claims = Claims::new(claims, subject, now, self.token_ttl());

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(
                error = %e,
                event = "token_encode_failed",
                "Failed to encode session token"
            );
            TokenError::TokenGenerationFailed
        })?;

        tracing::debug!(
            jti = ?claims.jti,
            user_uuid = ?claims.user_uuid(),
            expires_at = claims.exp,
            event = "token_issued",
            "Session token issued"
        );

        self.notify(&MessagePayload::token_issued(&claims));
        Ok(token)
    }

    /// Issues a token for a stored user: `userUUID`, `nickname` and the role
    /// authority as claims, the email as subject
    pub fn issue_for_user(&self, identity: &UserIdentity) -> DomainResult<String> {
        self.issue(identity.token_claims(), &identity.email)
    }

    /// Verifies structure, algorithm, signature and expiry of a token
    pub fn verify(&self, token: &str) -> Verification {
        match self.decode_claims(token) {
            Ok(claims) => Verification::Valid(claims),
            Err(err) => {
                tracing::debug!(
                    error_code = err.error_code(),
                    event = "token_rejected",
                    "Token verification failed"
                );
                Verification::Invalid(err)
            }
        }
    }

    /// Verifies a token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if the token is valid
    /// * `Err(DomainError)` - Token is malformed, forged, expired or lacks `sub`/`exp`
    pub fn parse_claims(&self, token: &str) -> DomainResult<Claims> {
        self.verify(token).into_result().map_err(DomainError::from)
    }

    /// The `userUUID` claim, `None` if it was never set
    pub fn parse_user_uuid(&self, token: &str) -> DomainResult<Option<String>> {
        Ok(self.parse_claims(token)?.custom.user_uuid)
    }

    /// The `nickname` claim, `None` if it was never set
    pub fn parse_nickname(&self, token: &str) -> DomainResult<Option<String>> {
        Ok(self.parse_claims(token)?.custom.nickname)
    }

    /// The `role` claim, `None` if it was never set
    pub fn parse_role(&self, token: &str) -> DomainResult<Option<String>> {
        Ok(self.parse_claims(token)?.custom.role)
    }

    /// The `sub` claim
    pub fn get_subject(&self, token: &str) -> DomainResult<String> {
        Ok(self.parse_claims(token)?.sub)
    }

    /// `true` iff the token is well-formed, HS256-signed with this service's
    /// key and not expired. Never fails.
    pub fn validate(&self, token: &str) -> bool {
        self.verify(token).is_valid()
    }

    /// Verifies a token and requires the full identity claim set
    pub fn authenticate(&self, token: &str) -> DomainResult<AuthenticatedUser> {
        let claims = self.parse_claims(token)?;
        Ok(AuthenticatedUser::from_claims(&claims)?)
    }

    /// Time left before a valid token expires
    pub fn remaining_ttl(&self, token: &str) -> DomainResult<Duration> {
        let claims = self.parse_claims(token)?;
        let now = self.clock.now().ok_or(TokenError::ClockUnavailable)?;
        Ok(claims.time_until_expiration(now))
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        if data.claims.sub.trim().is_empty() {
            return Err(TokenError::missing(CLAIM_SUBJECT));
        }

        let now = self.clock.now().ok_or(TokenError::ClockUnavailable)?;
        if data.claims.is_expired_at(now) {
            return Err(TokenError::ExpiredToken);
        }

        Ok(data.claims)
    }

    fn notify(&self, payload: &MessagePayload) {
        match self.publisher.publish(&self.config.event_topic, payload) {
            Ok(()) => {}
            Err(PublishError::NoSubscribers { topic }) => {
                tracing::debug!(topic = %topic, event = "auth_event_unobserved", "No subscribers for auth event");
            }
            Err(err) => {
                tracing::warn!(
                    topic = %self.config.event_topic,
                    error = %err,
                    event = "auth_event_publish_failed",
                    "Failed to publish auth event"
                );
            }
        }
    }
}
