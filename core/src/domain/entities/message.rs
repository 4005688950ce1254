//! Event payload handed to the messaging collaborator.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::claims::Claims;

/// Event type published after a token is issued
pub const TOKEN_ISSUED: &str = "TOKEN_ISSUED";

/// Message published on a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    /// Event type, e.g. `TOKEN_ISSUED`
    pub event_type: String,
    /// Originator of the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Event body
    #[serde(default)]
    pub data: Value,
}

impl MessagePayload {
    pub fn new(event_type: impl Into<String>, sender: Option<String>, data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            sender,
            data,
        }
    }

    /// Notification that a token was issued for the claims' subject.
    /// Never carries the token itself.
    pub fn token_issued(claims: &Claims) -> Self {
        Self::new(
            TOKEN_ISSUED,
            Some(claims.sub.clone()),
            json!({
                "userUUID": claims.user_uuid(),
                "jti": claims.jti,
                "issuedAt": claims.iat,
                "expiresAt": claims.exp,
            }),
        )
    }
}
