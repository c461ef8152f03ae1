//! Profile repository traits defining the interface for profile persistence.
//!
//! Reads that need no isolation go through [`ProfileRepository`] directly.
//! Check-then-write sequences run against a [`ProfileTransaction`] obtained
//! from [`ProfileRepository::begin`]; a transaction that is dropped without
//! being committed is rolled back.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::entities::{NewProfile, Profile};
use crate::errors::{DomainError, DomainResult};

/// Repository trait for Profile persistence operations
///
/// Lookups return `Ok(None)` when no row matches; `Err` is reserved for
/// transport or query failures.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Unit of work handle produced by [`ProfileRepository::begin`]
    type Tx: ProfileTransaction;

    /// Open a new transaction
    async fn begin(&self) -> Result<Self::Tx, DomainError>;

    /// Find a profile by its identifier
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, DomainError>;

    /// Find a profile by its phone number
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Profile>, DomainError>;
}

/// Operations available inside a store transaction
///
/// Writes that would give two profiles the same phone number fail with
/// [`DomainError::UniqueViolation`], either immediately or at commit.
#[async_trait]
pub trait ProfileTransaction: Send {
    /// Find a profile by phone number, seeing this transaction's own writes
    async fn find_by_phone(&mut self, phone_number: &str) -> Result<Option<Profile>, DomainError>;

    /// Insert a profile and return the id assigned by the store
    async fn insert_profile(&mut self, profile: NewProfile) -> Result<String, DomainError>;

    /// Replace name and phone number; `Ok(false)` when no profile has `id`
    async fn update_profile_by_id(
        &mut self,
        id: &str,
        full_name: &str,
        phone_number: &str,
    ) -> Result<bool, DomainError>;

    /// Add one to the success-login counter of `id`
    async fn increment_login_count(&mut self, id: &str) -> Result<(), DomainError>;

    /// Make every write of this transaction durable
    async fn commit(self) -> Result<(), DomainError>;

    /// Discard every write of this transaction
    async fn rollback(self) -> Result<(), DomainError>;
}

/// Commit `tx` when `outcome` succeeded, roll it back otherwise
///
/// A commit failure replaces the successful outcome. A rollback failure is
/// logged and the original error is returned.
pub async fn commit_or_rollback<T, X>(tx: X, outcome: DomainResult<T>) -> DomainResult<T>
where
    X: ProfileTransaction,
{
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                warn!(error = %rollback_error, "Failed to roll back transaction");
            }
            Err(error)
        }
    }
}
