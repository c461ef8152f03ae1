use std::borrow::Cow;

use ps_shared::utils::password::{fits_hash_input, is_alpha_name, is_strong_password};
use ps_shared::utils::phone::{is_e164, is_valid_indonesian_phone};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Letters only, e.g. "jonathan"
    #[validate(length(min = 3, max = 60), custom(function = "validate_full_name"))]
    pub full_name: String,

    /// E.164 number in the +62 range, e.g. "+6281234567"
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,

    /// Needs an uppercase letter, a digit and a special character
    #[validate(length(min = 3, max = 64), custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub profile_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,

    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 60), custom(function = "validate_full_name"))]
    pub full_name: String,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub full_name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn rule_violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    if is_alpha_name(full_name) {
        Ok(())
    } else {
        Err(rule_violation("alpha", "full_name may only contain letters"))
    }
}

fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if !is_e164(phone_number) {
        return Err(rule_violation(
            "e164",
            "phone_number must be in E.164 format",
        ));
    }
    if !is_valid_indonesian_phone(phone_number) {
        return Err(rule_violation(
            "phone_prefix",
            "phone_number must start with +62",
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if !fits_hash_input(password) {
        return Err(rule_violation(
            "password_bytes",
            "password must not exceed 72 bytes",
        ));
    }
    if !is_strong_password(password) {
        return Err(rule_violation(
            "password_strength",
            "password needs an uppercase letter, a digit and a special character",
        ));
    }
    Ok(())
}
