//! User identity as supplied by the persistence layer, and the identity a
//! request is trusted with after token verification.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::claims::{Claims, CustomClaims, CLAIM_NICKNAME, CLAIM_ROLE, CLAIM_SUBJECT, CLAIM_USER_UUID};
use crate::errors::TokenError;

const AUTHORITY_PREFIX: &str = "ROLE_";

/// Role of a user account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Bidder
    #[default]
    User,
    /// Auction administrator
    Admin,
}

impl Role {
    /// Authority string carried in the `role` claim
    pub fn authority(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    /// Parse either the authority form (`ROLE_ADMIN`) or the bare name (`ADMIN`)
    pub fn from_authority(value: &str) -> Option<Self> {
        let name = value.strip_prefix(AUTHORITY_PREFIX).unwrap_or(value);
        match name.to_ascii_uppercase().as_str() {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

/// Identity record handed over by the user store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(rename = "userUUID")]
    pub user_uuid: String,
    pub email: String,
    pub nickname: String,
    #[serde(default)]
    pub role: Role,
}

impl UserIdentity {
    /// Creates a new identity with a fresh id and the default role
    pub fn new(email: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            user_uuid: Uuid::new_v4().to_string(),
            email: email.into(),
            nickname: nickname.into(),
            role: Role::default(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Claims placed in this user's session token
    pub fn token_claims(&self) -> CustomClaims {
        CustomClaims::new()
            .with_user_uuid(self.user_uuid.clone())
            .with_nickname(self.nickname.clone())
            .with_role(self.role.authority())
    }
}

/// Identity extracted from a verified token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub email: String,
    #[serde(rename = "userUUID")]
    pub user_uuid: String,
    pub nickname: String,
    /// Authority string as carried by the token
    pub role: String,
}

impl AuthenticatedUser {
    /// Build from verified claims. Every identity claim must be present.
    pub fn from_claims(claims: &Claims) -> Result<Self, TokenError> {
        Ok(Self {
            email: claims.require(CLAIM_SUBJECT)?.to_string(),
            user_uuid: claims.require(CLAIM_USER_UUID)?.to_string(),
            nickname: claims.require(CLAIM_NICKNAME)?.to_string(),
            role: claims.require(CLAIM_ROLE)?.to_string(),
        })
    }

    pub fn role(&self) -> Option<Role> {
        Role::from_authority(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}
