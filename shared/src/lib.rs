//! Shared configuration and common types for the auction backend
//!
//! - Configuration types (environment, session token signing, logging)
//! - Tracing initialisation
//! - The error response shape used at the HTTP boundary

pub mod config;
pub mod errors;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, ConfigError, Environment, JwtConfig, LoggingConfig};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use logging::init_tracing;
