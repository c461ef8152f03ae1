//! Business services containing domain logic and use cases.

pub mod credential;
pub mod profile;

// Re-export commonly used types
pub use credential::{CredentialConfig, CredentialHelper, CredentialService};
pub use profile::ProfileService;
