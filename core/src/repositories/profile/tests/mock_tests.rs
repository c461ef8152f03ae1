//! Unit tests for the in-memory profile repository

use crate::domain::entities::NewProfile;
use crate::errors::{DomainError, ProfileError};
use crate::repositories::profile::{
    commit_or_rollback, MockOperation, MockProfileRepository, ProfileRepository,
    ProfileTransaction,
};

fn new_profile(phone: &str) -> NewProfile {
    NewProfile::new("jonathan", phone, "hash")
}

#[tokio::test]
async fn test_insert_is_invisible_until_commit() {
    let repo = MockProfileRepository::new();
    let mut tx = repo.begin().await.unwrap();

    let id = tx.insert_profile(new_profile("+62345")).await.unwrap();
    assert_eq!(id, "profile-id-1");
    assert!(tx.find_by_phone("+62345").await.unwrap().is_some());
    assert!(repo.find_by_phone("+62345").await.unwrap().is_none());

    tx.commit().await.unwrap();
    let found = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(found.phone_number, "+62345");
}

#[tokio::test]
async fn test_dropped_transaction_discards_writes() {
    let repo = MockProfileRepository::new();
    {
        let mut tx = repo.begin().await.unwrap();
        tx.insert_profile(new_profile("+62345")).await.unwrap();
    }
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_rollback_discards_writes() {
    let repo = MockProfileRepository::new();
    let mut tx = repo.begin().await.unwrap();
    tx.insert_profile(new_profile("+62345")).await.unwrap();
    tx.rollback().await.unwrap();
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_insert_rejects_duplicate_phone() {
    let repo = MockProfileRepository::new();
    let mut tx = repo.begin().await.unwrap();
    tx.insert_profile(new_profile("+62345")).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = repo.begin().await.unwrap();
    let result = tx.insert_profile(new_profile("+62345")).await;
    assert!(matches!(result, Err(DomainError::UniqueViolation { .. })));
}

#[tokio::test]
async fn test_second_commit_of_same_phone_is_rejected() {
    let repo = MockProfileRepository::new();
    let mut first = repo.begin().await.unwrap();
    let mut second = repo.begin().await.unwrap();

    // Both pass their existence check before either commits
    assert!(first.find_by_phone("+62345").await.unwrap().is_none());
    assert!(second.find_by_phone("+62345").await.unwrap().is_none());
    first.insert_profile(new_profile("+62345")).await.unwrap();
    second.insert_profile(new_profile("+62345")).await.unwrap();

    first.commit().await.unwrap();
    let result = second.commit().await;

    assert!(matches!(result, Err(DomainError::UniqueViolation { .. })));
    assert_eq!(repo.count_by_phone("+62345").await, 1);
}

#[tokio::test]
async fn test_update_missing_profile_reports_false() {
    let repo = MockProfileRepository::new();
    let mut tx = repo.begin().await.unwrap();
    let updated = tx
        .update_profile_by_id("profile-id-9", "jonathan", "+62345")
        .await
        .unwrap();
    assert!(!updated);
}

#[tokio::test]
async fn test_increment_login_count() {
    let repo = MockProfileRepository::new();
    let mut tx = repo.begin().await.unwrap();
    let id = tx.insert_profile(new_profile("+62345")).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = repo.begin().await.unwrap();
    tx.increment_login_count(&id).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(repo.get(&id).await.unwrap().success_login_count, 1);
}

#[tokio::test]
async fn test_injected_failure() {
    let repo = MockProfileRepository::new();
    repo.fail_on(MockOperation::FindById).await;
    assert!(matches!(
        repo.find_by_id("profile-id-1").await,
        Err(DomainError::Database { .. })
    ));

    repo.clear_failures().await;
    assert!(repo.find_by_id("profile-id-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_commit_or_rollback_rolls_back_on_error() {
    let repo = MockProfileRepository::new();
    let mut tx = repo.begin().await.unwrap();
    tx.insert_profile(new_profile("+62345")).await.unwrap();

    let outcome: Result<(), DomainError> = Err(ProfileError::DataConflict.into());
    let result = commit_or_rollback(tx, outcome).await;

    assert!(matches!(
        result,
        Err(DomainError::Profile(ProfileError::DataConflict))
    ));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_commit_or_rollback_surfaces_commit_error() {
    let repo = MockProfileRepository::new();
    let mut tx = repo.begin().await.unwrap();
    let id = tx.insert_profile(new_profile("+62345")).await.unwrap();
    repo.fail_on(MockOperation::Commit).await;

    let result = commit_or_rollback(tx, Ok(id)).await;

    assert!(matches!(result, Err(DomainError::Database { .. })));
    assert!(repo.is_empty().await);
}
