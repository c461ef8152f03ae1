//! Credential helper module
//!
//! This module handles password hashing and bearer-token issuance:
//! - bcrypt password hashing and verification
//! - HS256 JWT generation and verification

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::CredentialConfig;
pub use service::{CredentialHelper, CredentialService};
