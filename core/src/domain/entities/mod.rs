//! Domain entities representing core business objects.

pub mod claims;
pub mod message;
pub mod user;

// Re-export commonly used types
pub use claims::{
    Claims, CustomClaims, CLAIM_EXPIRES_AT, CLAIM_ISSUED_AT, CLAIM_NICKNAME, CLAIM_ROLE,
    CLAIM_SUBJECT, CLAIM_TOKEN_ID, CLAIM_USER_UUID,
};
pub use message::{MessagePayload, TOKEN_ISSUED};
pub use user::{AuthenticatedUser, Role, UserIdentity};
