//! Translation of domain and request errors into HTTP responses
//!
//! Every failure leaves the service as an [`ErrorResponse`] body. Business
//! classifications carry their own message; infrastructure causes are logged
//! and never echoed to the client.

use std::collections::HashMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use ps_core::errors::{AuthError, DomainError, ProfileError};
use ps_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;
use validator::ValidationErrors;

/// Status code and error code for a domain error
pub fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Profile(profile_error) => match profile_error {
            ProfileError::RegistrationFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::REGISTRATION_FAILED,
            ),
            ProfileError::DataConflict => (StatusCode::CONFLICT, error_codes::DATA_CONFLICT),
            ProfileError::ProfileNotFound => {
                (StatusCode::NOT_FOUND, error_codes::PROFILE_NOT_FOUND)
            }
            ProfileError::GetProfileFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::GET_PROFILE_FAILED,
            ),
            ProfileError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_CREDENTIALS)
            }
            ProfileError::LoginFailed { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::LOGIN_FAILED)
            }
            ProfileError::UpdateProfileFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::UPDATE_PROFILE_FAILED,
            ),
        },
        DomainError::Auth(AuthError::NotAuthenticated) => {
            (StatusCode::FORBIDDEN, error_codes::NOT_AUTHENTICATED)
        }
        DomainError::Auth(AuthError::InvalidToken) => {
            (StatusCode::BAD_REQUEST, error_codes::INVALID_TOKEN)
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
        ),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = classify(error);

    let message = if code == error_codes::INTERNAL_ERROR {
        log::error!("Unclassified domain error: {}", error);
        "An internal server error occurred".to_string()
    } else {
        if status.is_server_error() {
            log::error!("Domain error {}: {:?}", code, error);
        } else {
            log::debug!("Domain error {}: {}", code, error);
        }
        error.to_string()
    };

    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// Field-by-field validation report
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), serde_json::json!(messages));
    }

    HttpResponse::BadRequest().json(ErrorResponse::with_details(
        error_codes::VALIDATION_ERROR,
        "Request validation failed",
        details,
    ))
}

/// Errors produced at the HTTP boundary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("request validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("invalid request body: {0}")]
    InvalidRequest(String),
}

impl From<ProfileError> for ApiError {
    fn from(error: ProfileError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => classify(error).0,
            ApiError::Validation(_) | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(error) => handle_domain_error(error),
            ApiError::Validation(errors) => validation_error_response(errors),
            ApiError::InvalidRequest(reason) => {
                log::debug!("Rejected request body: {}", reason);
                HttpResponse::BadRequest()
                    .json(ErrorResponse::new(error_codes::INVALID_REQUEST, "Invalid request body"))
            }
        }
    }
}
