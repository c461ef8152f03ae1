//! Unit tests for domain error types

use super::*;

#[test]
fn test_profile_error_messages() {
    assert_eq!(
        ProfileError::DataConflict.to_string(),
        "error there existing data conflicted with new data"
    );
    assert_eq!(
        ProfileError::InvalidCredentials.to_string(),
        "error credentials combination not match"
    );
    assert_eq!(ProfileError::ProfileNotFound.to_string(), "error profile not found");
}

#[test]
fn test_reason_is_not_rendered() {
    let error = ProfileError::LoginFailed {
        reason: "connection reset by peer".to_string(),
    };
    assert_eq!(error.to_string(), "error when try to login");
    assert_eq!(error.reason(), Some("connection reset by peer"));
    assert!(ProfileError::DataConflict.reason().is_none());
}

#[test]
fn test_bridge_is_transparent() {
    let error: DomainError = AuthError::InvalidToken.into();
    assert_eq!(error.to_string(), "error invalid token");
    assert!(matches!(error, DomainError::Auth(AuthError::InvalidToken)));

    let error: DomainError = ProfileError::ProfileNotFound.into();
    assert_eq!(error.to_string(), "error profile not found");
}
