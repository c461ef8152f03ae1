//! Business error classifications for the profile use cases and credentials
//!
//! Display strings are the client-facing messages. Variants that wrap an
//! infrastructure failure keep the cause in `reason`, which is logged but
//! never rendered.

use thiserror::Error;

/// Outcomes of the register/login/get/update use cases
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("error when register a new profile")]
    RegistrationFailed { reason: String },

    #[error("error there existing data conflicted with new data")]
    DataConflict,

    #[error("error profile not found")]
    ProfileNotFound,

    #[error("error when get user profile")]
    GetProfileFailed { reason: String },

    #[error("error credentials combination not match")]
    InvalidCredentials,

    #[error("error when try to login")]
    LoginFailed { reason: String },

    #[error("error when updating profile")]
    UpdateProfileFailed { reason: String },
}

impl ProfileError {
    /// Underlying cause for logging, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            ProfileError::RegistrationFailed { reason }
            | ProfileError::GetProfileFailed { reason }
            | ProfileError::LoginFailed { reason }
            | ProfileError::UpdateProfileFailed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Password and token failures raised by the credential helper
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("error password not match with hashed password")]
    PasswordMismatch,

    #[error("error password exceeds 72 bytes")]
    PasswordTooLong,

    #[error("error when processing password hash")]
    HashingFailed { reason: String },

    #[error("error when generating token")]
    TokenGenerationFailed { reason: String },

    #[error("error invalid token")]
    InvalidToken,

    #[error("error not authenticated")]
    NotAuthenticated,
}
