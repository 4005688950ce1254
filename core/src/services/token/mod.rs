//! Token service module for session JWT management
//!
//! This module handles all token-related operations including:
//! - HS256 session token issuance
//! - Signature, algorithm and expiry verification
//! - Typed access to individual claims
//! - Bearer token extraction from request headers

mod bearer;
mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use bearer::{resolve_bearer_token, BEARER_PREFIX};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::{TokenService, Verification};
