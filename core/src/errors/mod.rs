//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, ProfileError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Store transport or query failure
    #[error("Database error: {message}")]
    Database { message: String },

    /// Store-level uniqueness constraint rejected a write
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    // Bridge to specific error types
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type DomainResult<T> = Result<T, DomainError>;
