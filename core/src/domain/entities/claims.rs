//! Claims carried inside a signed session token.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::TokenError;

/// Subject claim (user email)
pub const CLAIM_SUBJECT: &str = "sub";
/// Issued-at claim
pub const CLAIM_ISSUED_AT: &str = "iat";
/// Expiration claim
pub const CLAIM_EXPIRES_AT: &str = "exp";
/// Token id claim
pub const CLAIM_TOKEN_ID: &str = "jti";
/// Application user id claim
pub const CLAIM_USER_UUID: &str = "userUUID";
/// Display name claim
pub const CLAIM_NICKNAME: &str = "nickname";
/// Authority claim, e.g. `ROLE_USER`
pub const CLAIM_ROLE: &str = "role";

/// Registered claims always set by the token service. Caller values for these are dropped.
const RESERVED_CLAIMS: &[&str] = &[
    CLAIM_SUBJECT,
    CLAIM_ISSUED_AT,
    CLAIM_EXPIRES_AT,
    CLAIM_TOKEN_ID,
    "nbf",
];

/// Caller-supplied claims: the known application claims plus an open extension map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(rename = "userUUID", default, skip_serializing_if = "Option::is_none")]
    pub user_uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Forward-compatible custom claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build claims from an untyped JSON map.
    ///
    /// String values under `userUUID`, `nickname` and `role` are lifted into the
    /// named fields. Registered claim names are dropped.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            extra: map,
            ..Self::default()
        }
        .normalized()
    }

    pub fn with_user_uuid(mut self, user_uuid: impl Into<String>) -> Self {
        self.user_uuid = Some(user_uuid.into());
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Add a custom claim. Known and registered names are routed through
    /// the same rules as [`CustomClaims::from_map`].
    pub fn with_claim(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self.normalized()
    }

    /// Move known claim names out of `extra` and drop reserved ones, so the
    /// serialized payload never carries a claim name twice.
    pub fn normalized(mut self) -> Self {
        for name in RESERVED_CLAIMS {
            if self.extra.remove(*name).is_some() {
                tracing::debug!(claim = *name, event = "reserved_claim_dropped", "Dropping caller-supplied registered claim");
            }
        }

        let known: [(&str, &mut Option<String>); 3] = [
            (CLAIM_USER_UUID, &mut self.user_uuid),
            (CLAIM_NICKNAME, &mut self.nickname),
            (CLAIM_ROLE, &mut self.role),
        ];
        for (name, slot) in known {
            match self.extra.remove(name) {
                Some(Value::String(value)) => {
                    if slot.is_none() {
                        *slot = Some(value);
                    }
                }
                Some(other) => {
                    tracing::warn!(claim = name, value_type = json_type(&other), event = "claim_type_mismatch", "Dropping non-string value for string claim");
                }
                None => {}
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.user_uuid.is_none()
            && self.nickname.is_none()
            && self.role.is_none()
            && self.extra.is_empty()
    }
}

/// Full claim set of an issued token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email). Defaults to empty so a missing claim is reported as `ClaimMissing`.
    #[serde(default)]
    pub sub: String,

    /// Issued at timestamp (seconds since epoch)
    #[serde(default)]
    pub iat: i64,

    /// Expiration timestamp (seconds since epoch)
    #[serde(default)]
    pub exp: i64,

    /// Token id, distinguishes tokens issued within the same second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    #[serde(flatten)]
    pub custom: CustomClaims,
}

impl Claims {
    /// Creates the canonical claim set for a new token
    ///
    /// # Arguments
    ///
    /// * `custom` - Caller claims (normalized before use)
    /// * `subject` - The user's stable identity
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Token lifetime
    pub fn new(
        custom: CustomClaims,
        subject: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.into(),
            iat,
            exp: iat + ttl.num_seconds(),
            jti: Some(Uuid::new_v4().to_string()),
            custom: custom.normalized(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn user_uuid(&self) -> Option<&str> {
        self.custom.user_uuid.as_deref()
    }

    pub fn nickname(&self) -> Option<&str> {
        self.custom.nickname.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.custom.role.as_deref()
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// A token is expired from its `exp` second onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Time left until expiration, zero if already expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        let remaining = self.exp - now.timestamp();
        if remaining > 0 {
            Duration::seconds(remaining)
        } else {
            Duration::zero()
        }
    }

    /// Look up any claim by its wire name
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            CLAIM_SUBJECT => Some(Value::String(self.sub.clone())),
            CLAIM_ISSUED_AT => Some(Value::from(self.iat)),
            CLAIM_EXPIRES_AT => Some(Value::from(self.exp)),
            CLAIM_TOKEN_ID => self.jti.clone().map(Value::String),
            CLAIM_USER_UUID => self.custom.user_uuid.clone().map(Value::String),
            CLAIM_NICKNAME => self.custom.nickname.clone().map(Value::String),
            CLAIM_ROLE => self.custom.role.clone().map(Value::String),
            other => self.custom.extra.get(other).cloned(),
        }
    }

    /// A named string claim that must be present and non-empty
    pub fn require(&self, name: &str) -> Result<&str, TokenError> {
        let value = match name {
            CLAIM_SUBJECT => Some(self.sub.as_str()),
            CLAIM_TOKEN_ID => self.jti.as_deref(),
            CLAIM_USER_UUID => self.user_uuid(),
            CLAIM_NICKNAME => self.nickname(),
            CLAIM_ROLE => self.role(),
            other => self.custom.extra.get(other).and_then(Value::as_str),
        };
        value
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TokenError::missing(name))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_custom() -> CustomClaims {
        CustomClaims::new()
            .with_user_uuid("test-uuid-123")
            .with_nickname("testUser")
            .with_role("ROLE_USER")
    }

    #[test]
    fn test_new_claims_expiry_is_iat_plus_ttl() {
        let now = Utc::now();
        let claims = Claims::new(sample_custom(), "test@example.com", now, Duration::hours(24));

        assert_eq!(claims.sub, "test@example.com");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 86400);
        assert!(claims.jti.is_some());
        assert!(!claims.is_expired_at(now));
    }

    #[test]
    fn test_claims_expiration_boundary() {
        let now = Utc::now();
        let claims = Claims::new(CustomClaims::new(), "a@b.c", now, Duration::seconds(10));

        assert!(!claims.is_expired_at(now + Duration::seconds(9)));
        assert!(claims.is_expired_at(now + Duration::seconds(10)));
        assert_eq!(claims.time_until_expiration(now + Duration::seconds(4)), Duration::seconds(6));
        assert_eq!(claims.time_until_expiration(now + Duration::days(1)), Duration::zero());
    }

    #[test]
    fn test_from_map_lifts_known_claims() {
        let mut map = Map::new();
        map.insert("userUUID".to_string(), json!("abc"));
        map.insert("nickname".to_string(), json!("bob"));
        map.insert("role".to_string(), json!("ADMIN"));
        map.insert("auctionId".to_string(), json!(42));

        let claims = CustomClaims::from_map(map);

        assert_eq!(claims.user_uuid.as_deref(), Some("abc"));
        assert_eq!(claims.nickname.as_deref(), Some("bob"));
        assert_eq!(claims.role.as_deref(), Some("ADMIN"));
        assert_eq!(claims.extra.len(), 1);
        assert_eq!(claims.extra["auctionId"], json!(42));
    }

    #[test]
    fn test_reserved_and_mistyped_claims_dropped() {
        let claims = CustomClaims::new()
            .with_claim("sub", json!("attacker@example.com"))
            .with_claim("exp", json!(9999999999i64))
            .with_claim("role", json!(7));

        assert!(claims.is_empty());
    }

    #[test]
    fn test_named_field_wins_over_map_value() {
        let claims = CustomClaims::new()
            .with_role("ROLE_ADMIN")
            .with_claim("role", json!("ROLE_USER"));

        assert_eq!(claims.role.as_deref(), Some("ROLE_ADMIN"));
        assert!(claims.extra.is_empty());
    }

    #[test]
    fn test_claims_wire_names() {
        let now = Utc::now();
        let claims = Claims::new(
            sample_custom().with_claim("bidLimit", json!(1000)),
            "test@example.com",
            now,
            Duration::hours(1),
        );

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["sub"], "test@example.com");
        assert_eq!(value["userUUID"], "test-uuid-123");
        assert_eq!(value["nickname"], "testUser");
        assert_eq!(value["role"], "ROLE_USER");
        assert_eq!(value["bidLimit"], 1000);
        assert!(value["iat"].is_i64());
        assert!(value["exp"].is_i64());

        let back: Claims = serde_json::from_value(value).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn test_absent_optional_claims_deserialize_as_none() {
        let claims: Claims =
            serde_json::from_value(json!({"sub": "a@b.c", "iat": 1, "exp": 2})).unwrap();

        assert_eq!(claims.user_uuid(), None);
        assert_eq!(claims.nickname(), None);
        assert_eq!(claims.role(), None);
        assert!(claims.custom.extra.is_empty());
    }

    #[test]
    fn test_get_and_require() {
        let now = Utc::now();
        let claims = Claims::new(
            CustomClaims::new().with_user_uuid("u-1").with_claim("tier", json!("gold")),
            "test@example.com",
            now,
            Duration::hours(1),
        );

        assert_eq!(claims.get("sub"), Some(json!("test@example.com")));
        assert_eq!(claims.get("userUUID"), Some(json!("u-1")));
        assert_eq!(claims.get("tier"), Some(json!("gold")));
        assert_eq!(claims.get("nickname"), None);

        assert_eq!(claims.require("userUUID").unwrap(), "u-1");
        assert_eq!(claims.require("tier").unwrap(), "gold");
        assert_eq!(
            claims.require("nickname").unwrap_err(),
            TokenError::ClaimMissing {
                claim: "nickname".to_string()
            }
        );
    }
}
