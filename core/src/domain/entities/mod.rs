//! Domain entities representing core business objects.

pub mod profile;
pub mod token;

// Re-export commonly used types
pub use profile::{NewProfile, Profile};
pub use token::{Claims, DEFAULT_TOKEN_EXPIRY_SECONDS, PROFILE_ID_CLAIM};
