//! Business services containing domain logic and use cases.

pub mod token;

// Re-export commonly used types
pub use token::{
    resolve_bearer_token, Clock, FixedClock, SystemClock, TokenService, TokenServiceConfig,
    Verification,
};
