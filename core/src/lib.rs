//! # Auction Core
//!
//! Core domain layer for the auction backend.
//! This crate issues and verifies the HS256 session tokens that carry a user's
//! identity between requests, and reports token issuance to an event publisher.

pub mod domain;
pub mod errors;
pub mod messaging;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use messaging::{BroadcastEventPublisher, EventPublisher, NoOpEventPublisher, AUTH_TOKEN_TOPIC};
pub use services::*;
