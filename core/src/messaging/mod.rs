//! Messaging seam for authentication events.
//!
//! The token service publishes best-effort notifications through an
//! [`EventPublisher`]; delivery failures are logged and never reach the caller.

mod r#trait;
pub use r#trait::{EventPublisher, PublishError};

mod noop;
pub use noop::NoOpEventPublisher;

mod broadcast;
pub use broadcast::{AuthEvent, BroadcastEventPublisher};

/// Topic used for token lifecycle events
pub const AUTH_TOKEN_TOPIC: &str = "auth.token";
