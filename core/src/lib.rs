//! # Profile Core
//!
//! Core business logic and domain layer for the profile service.
//! This crate contains domain entities, the credential helper, the profile
//! service, repository interfaces and the error types shared by every layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Claims, NewProfile, Profile, ProfileSummary};
pub use errors::{AuthError, DomainError, DomainResult, ProfileError};
pub use repositories::{commit_or_rollback, MockProfileRepository, ProfileRepository, ProfileTransaction};
pub use services::{CredentialConfig, CredentialHelper, CredentialService, ProfileService};
