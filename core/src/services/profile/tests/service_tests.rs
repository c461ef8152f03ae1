//! Unit tests for the profile service

use crate::domain::entities::NewProfile;
use crate::domain::value_objects::ProfileSummary;
use crate::errors::{DomainError, ProfileError};
use crate::repositories::MockOperation;
use crate::services::credential::CredentialHelper;

use super::mocks::*;

macro_rules! assert_profile_error {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err(DomainError::Profile($pattern)) => {}
            other => panic!("expected {}, got {:?}", stringify!($pattern), other),
        }
    };
}

// Registration

#[tokio::test]
async fn test_register_then_get_profile() {
    let (service, _) = stub_service(StubCredentials::default());

    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();
    assert_eq!(id, "profile-id-1");

    let profile = service.get_profile(&id).await.unwrap();
    assert_eq!(
        profile,
        ProfileSummary {
            full_name: "jonathan".to_string(),
            phone_number: "+62345".to_string(),
        }
    );
}

#[tokio::test]
async fn test_register_stores_hash_not_password() {
    let (service, repository) = real_service();

    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();

    let stored = repository.get(&id).await.unwrap();
    assert_ne!(stored.password_hash, "12345A!");
    assert!(service
        .credentials()
        .verify_password("12345A!", &stored.password_hash)
        .is_ok());
}

#[tokio::test]
async fn test_register_duplicate_phone_conflicts() {
    let (service, repository) = stub_service(StubCredentials::default());
    service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();

    let result = service.register("joseph", "+62345", "54321B?").await;

    assert_profile_error!(result, ProfileError::DataConflict);
    assert_eq!(repository.count_by_phone("+62345").await, 1);
}

#[tokio::test]
async fn test_register_conflict_detected_at_commit() {
    let (service, repository) = stub_service(StubCredentials::default());
    repository
        .race_next_commit_with(NewProfile::new("joseph", "+62345", "hashed:other"))
        .await;

    let result = service.register("jonathan", "+62345", "12345A!").await;

    assert_profile_error!(result, ProfileError::DataConflict);
    assert_eq!(repository.count_by_phone("+62345").await, 1);
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_register_hashing_failure() {
    let (service, repository) = stub_service(StubCredentials {
        fail_hash: true,
        ..Default::default()
    });

    let result = service.register("jonathan", "+62345", "12345A!").await;

    assert_profile_error!(result, ProfileError::RegistrationFailed { .. });
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_register_lookup_failure_is_registration_failure() {
    let (service, repository) = stub_service(StubCredentials::default());
    repository.fail_on(MockOperation::FindByPhone).await;

    let result = service.register("jonathan", "+62345", "12345A!").await;

    assert_profile_error!(result, ProfileError::RegistrationFailed { .. });
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_register_insert_failure_is_registration_failure() {
    let (service, repository) = stub_service(StubCredentials::default());
    repository.fail_on(MockOperation::Insert).await;

    let result = service.register("jonathan", "+62345", "12345A!").await;

    assert_profile_error!(result, ProfileError::RegistrationFailed { .. });
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_register_begin_failure_is_registration_failure() {
    let (service, repository) = stub_service(StubCredentials::default());
    repository.fail_on(MockOperation::Begin).await;

    let result = service.register("jonathan", "+62345", "12345A!").await;

    assert_profile_error!(result, ProfileError::RegistrationFailed { .. });
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_register_commit_failure_surfaces_unchanged() {
    let (service, repository) = stub_service(StubCredentials::default());
    repository.fail_on(MockOperation::Commit).await;

    let result = service.register("jonathan", "+62345", "12345A!").await;

    assert!(matches!(result, Err(DomainError::Database { .. })));
    assert!(repository.is_empty().await);
}

// Login

#[tokio::test]
async fn test_login_returns_verifiable_token_and_counts() {
    let (service, repository) = real_service();
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();

    let token = service.login("+62345", "12345A!").await.unwrap();

    assert_eq!(service.credentials().verify_token(&token).unwrap(), id);
    assert_eq!(repository.get(&id).await.unwrap().success_login_count, 1);
}

#[tokio::test]
async fn test_each_login_increments_once() {
    let (service, repository) = stub_service(StubCredentials::default());
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();

    for _ in 0..3 {
        service.login("+62345", "12345A!").await.unwrap();
    }

    assert_eq!(repository.get(&id).await.unwrap().success_login_count, 3);
}

#[tokio::test]
async fn test_login_wrong_password_leaves_counter() {
    let (service, repository) = stub_service(StubCredentials::default());
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();

    let result = service.login("+62345", "wrong").await;

    assert_profile_error!(result, ProfileError::InvalidCredentials);
    assert_eq!(repository.get(&id).await.unwrap().success_login_count, 0);
}

#[tokio::test]
async fn test_login_unknown_phone_is_invalid_credentials() {
    let (service, _) = stub_service(StubCredentials::default());

    let result = service.login("+62999", "12345A!").await;

    assert_profile_error!(result, ProfileError::InvalidCredentials);
}

#[tokio::test]
async fn test_login_lookup_failure() {
    let (service, repository) = stub_service(StubCredentials::default());
    repository.fail_on(MockOperation::FindByPhone).await;

    let result = service.login("+62345", "12345A!").await;

    assert_profile_error!(result, ProfileError::LoginFailed { .. });
}

#[tokio::test]
async fn test_login_verification_error_is_not_invalid_credentials() {
    let (service, repository) = stub_service(StubCredentials {
        fail_verify: true,
        ..Default::default()
    });
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();

    let result = service.login("+62345", "12345A!").await;

    assert_profile_error!(result, ProfileError::LoginFailed { .. });
    assert_eq!(repository.get(&id).await.unwrap().success_login_count, 0);
}

#[tokio::test]
async fn test_login_counter_failure_returns_no_token() {
    let (service, repository) = stub_service(StubCredentials::default());
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();
    repository.fail_on(MockOperation::IncrementLoginCount).await;

    let result = service.login("+62345", "12345A!").await;

    assert_profile_error!(result, ProfileError::LoginFailed { .. });
    assert_eq!(repository.get(&id).await.unwrap().success_login_count, 0);
}

#[tokio::test]
async fn test_login_token_failure_rolls_back_counter() {
    let (service, repository) = stub_service(StubCredentials {
        fail_generate: true,
        ..Default::default()
    });
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();

    let result = service.login("+62345", "12345A!").await;

    assert_profile_error!(result, ProfileError::LoginFailed { .. });
    assert_eq!(repository.get(&id).await.unwrap().success_login_count, 0);
}

#[tokio::test]
async fn test_login_begin_failure_is_login_failure() {
    let (service, repository) = stub_service(StubCredentials::default());
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();
    repository.fail_on(MockOperation::Begin).await;

    let result = service.login("+62345", "12345A!").await;

    assert_profile_error!(result, ProfileError::LoginFailed { .. });
    assert_eq!(repository.get(&id).await.unwrap().success_login_count, 0);
}

#[tokio::test]
async fn test_login_commit_failure_returns_no_token() {
    let (service, repository) = stub_service(StubCredentials::default());
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();
    repository.fail_on(MockOperation::Commit).await;

    let result = service.login("+62345", "12345A!").await;

    assert!(matches!(result, Err(DomainError::Database { .. })));
    assert_eq!(repository.get(&id).await.unwrap().success_login_count, 0);
}

// Profile retrieval

#[tokio::test]
async fn test_get_missing_profile() {
    let (service, _) = stub_service(StubCredentials::default());

    let result = service.get_profile("profile-id-404").await;

    assert_profile_error!(result, ProfileError::ProfileNotFound);
}

#[tokio::test]
async fn test_get_profile_store_failure() {
    let (service, repository) = stub_service(StubCredentials::default());
    repository.fail_on(MockOperation::FindById).await;

    let result = service.get_profile("profile-id-1").await;

    assert_profile_error!(result, ProfileError::GetProfileFailed { .. });
}

// Profile update

#[tokio::test]
async fn test_update_profile() {
    let (service, repository) = stub_service(StubCredentials::default());
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();

    service
        .update_profile(&id, "joseph", "+62999")
        .await
        .unwrap();

    let stored = repository.get(&id).await.unwrap();
    assert_eq!(stored.full_name, "joseph");
    assert_eq!(stored.phone_number, "+62999");
    assert_eq!(stored.password_hash, "hashed:12345A!");
}

#[tokio::test]
async fn test_update_to_taken_phone_conflicts_without_mutation() {
    let (service, repository) = stub_service(StubCredentials::default());
    let owner = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();
    let other = service
        .register("joseph", "+62777", "12345A!")
        .await
        .unwrap();

    let result = service.update_profile(&other, "joseph", "+62345").await;

    assert_profile_error!(result, ProfileError::DataConflict);
    let owner = repository.get(&owner).await.unwrap();
    let other = repository.get(&other).await.unwrap();
    assert_eq!((owner.full_name.as_str(), owner.phone_number.as_str()), ("jonathan", "+62345"));
    assert_eq!((other.full_name.as_str(), other.phone_number.as_str()), ("joseph", "+62777"));
}

#[tokio::test]
async fn test_update_keeping_own_phone_conflicts() {
    let (service, repository) = stub_service(StubCredentials::default());
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();

    let result = service.update_profile(&id, "johnny", "+62345").await;

    assert_profile_error!(result, ProfileError::DataConflict);
    assert_eq!(repository.get(&id).await.unwrap().full_name, "jonathan");
}

#[tokio::test]
async fn test_update_missing_profile() {
    let (service, _) = stub_service(StubCredentials::default());

    let result = service
        .update_profile("profile-id-404", "joseph", "+62999")
        .await;

    assert_profile_error!(result, ProfileError::ProfileNotFound);
}

#[tokio::test]
async fn test_update_conflict_detected_at_commit() {
    let (service, repository) = stub_service(StubCredentials::default());
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();
    repository
        .race_next_commit_with(NewProfile::new("joseph", "+62999", "hashed:other"))
        .await;

    let result = service.update_profile(&id, "jonathan", "+62999").await;

    assert_profile_error!(result, ProfileError::DataConflict);
    assert_eq!(repository.get(&id).await.unwrap().phone_number, "+62345");
}

#[tokio::test]
async fn test_update_store_failure() {
    let (service, repository) = stub_service(StubCredentials::default());
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();
    repository.fail_on(MockOperation::Update).await;

    let result = service.update_profile(&id, "joseph", "+62999").await;

    assert_profile_error!(result, ProfileError::UpdateProfileFailed { .. });
    assert_eq!(repository.get(&id).await.unwrap().full_name, "jonathan");
}

#[tokio::test]
async fn test_update_begin_failure_is_update_failure() {
    let (service, repository) = stub_service(StubCredentials::default());
    let id = service
        .register("jonathan", "+62345", "12345A!")
        .await
        .unwrap();
    repository.fail_on(MockOperation::Begin).await;

    let result = service.update_profile(&id, "joseph", "+62999").await;

    assert_profile_error!(result, ProfileError::UpdateProfileFailed { .. });
    assert_eq!(repository.get(&id).await.unwrap().full_name, "jonathan");
}
