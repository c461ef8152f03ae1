//! In-memory implementation of ProfileRepository for tests and local runs
//!
//! Transactions stage their writes and apply them atomically on commit. The
//! phone-number uniqueness constraint is checked when a write is staged and
//! again when it is applied, so two transactions that both passed their
//! existence check cannot both commit the same number.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{NewProfile, Profile};
use crate::errors::DomainError;

use super::trait_::{ProfileRepository, ProfileTransaction};

/// Name reported for the phone-number uniqueness constraint
pub const PHONE_UNIQUE_CONSTRAINT: &str = "user_profile_phone_number_key";

/// Repository operations that can be made to fail on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    Begin,
    FindById,
    FindByPhone,
    Insert,
    Update,
    IncrementLoginCount,
    Commit,
}

#[derive(Debug, Clone)]
enum StagedWrite {
    Insert(Profile),
    Update {
        id: String,
        full_name: String,
        phone_number: String,
    },
    IncrementLoginCount { id: String },
}

#[derive(Default)]
struct MockState {
    profiles: BTreeMap<String, Profile>,
    next_id: u64,
    failures: HashSet<MockOperation>,
    racing_insert: Option<NewProfile>,
}

impl MockState {
    fn check(&self, operation: MockOperation) -> Result<(), DomainError> {
        if self.failures.contains(&operation) {
            return Err(DomainError::Database {
                message: format!("injected failure on {:?}", operation),
            });
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        format!("profile-id-{}", self.next_id)
    }
}

/// Mock profile repository backed by a shared map
#[derive(Clone, Default)]
pub struct MockProfileRepository {
    state: Arc<RwLock<MockState>>,
}

impl MockProfileRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call of `operation` fail with a database error
    pub async fn fail_on(&self, operation: MockOperation) {
        self.state.write().await.failures.insert(operation);
    }

    /// Stop injecting failures
    pub async fn clear_failures(&self) {
        self.state.write().await.failures.clear();
    }

    /// Have a concurrent writer commit `profile` just before the next commit
    pub async fn race_next_commit_with(&self, profile: NewProfile) {
        self.state.write().await.racing_insert = Some(profile);
    }

    /// Number of committed profiles
    pub async fn len(&self) -> usize {
        self.state.read().await.profiles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of committed profiles holding `phone_number`
    pub async fn count_by_phone(&self, phone_number: &str) -> usize {
        self.state
            .read()
            .await
            .profiles
            .values()
            .filter(|p| p.phone_number == phone_number)
            .count()
    }

    /// Committed snapshot of a single profile
    pub async fn get(&self, id: &str) -> Option<Profile> {
        self.state.read().await.profiles.get(id).cloned()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    type Tx = MockProfileTransaction;

    async fn begin(&self) -> Result<Self::Tx, DomainError> {
        self.state.read().await.check(MockOperation::Begin)?;
        Ok(MockProfileTransaction {
            state: Arc::clone(&self.state),
            staged: Vec::new(),
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, DomainError> {
        let state = self.state.read().await;
        state.check(MockOperation::FindById)?;
        Ok(state.profiles.get(id).cloned())
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Profile>, DomainError> {
        let state = self.state.read().await;
        state.check(MockOperation::FindByPhone)?;
        Ok(find_phone(&state.profiles, phone_number, None).cloned())
    }
}

/// Transaction over [`MockProfileRepository`]; dropping it discards staged writes
pub struct MockProfileTransaction {
    state: Arc<RwLock<MockState>>,
    staged: Vec<StagedWrite>,
}

impl MockProfileTransaction {
    /// Committed rows with this transaction's writes applied
    async fn view(&self) -> Result<BTreeMap<String, Profile>, DomainError> {
        let mut profiles = self.state.read().await.profiles.clone();
        apply(&mut profiles, &self.staged)?;
        Ok(profiles)
    }
}

#[async_trait]
impl ProfileTransaction for MockProfileTransaction {
    async fn find_by_phone(&mut self, phone_number: &str) -> Result<Option<Profile>, DomainError> {
        self.state.read().await.check(MockOperation::FindByPhone)?;
        let view = self.view().await?;
        Ok(find_phone(&view, phone_number, None).cloned())
    }

    async fn insert_profile(&mut self, profile: NewProfile) -> Result<String, DomainError> {
        self.state.read().await.check(MockOperation::Insert)?;
        let view = self.view().await?;
        if find_phone(&view, &profile.phone_number, None).is_some() {
            return Err(unique_violation());
        }

        let id = self.state.write().await.allocate_id();
        self.staged
            .push(StagedWrite::Insert(Profile::from_new(id.clone(), profile)));
        Ok(id)
    }

    async fn update_profile_by_id(
        &mut self,
        id: &str,
        full_name: &str,
        phone_number: &str,
    ) -> Result<bool, DomainError> {
        self.state.read().await.check(MockOperation::Update)?;
        let view = self.view().await?;
        if !view.contains_key(id) {
            return Ok(false);
        }
        if find_phone(&view, phone_number, Some(id)).is_some() {
            return Err(unique_violation());
        }

        self.staged.push(StagedWrite::Update {
            id: id.to_string(),
            full_name: full_name.to_string(),
            phone_number: phone_number.to_string(),
        });
        Ok(true)
    }

    async fn increment_login_count(&mut self, id: &str) -> Result<(), DomainError> {
        self.state
            .read()
            .await
            .check(MockOperation::IncrementLoginCount)?;
        self.staged
            .push(StagedWrite::IncrementLoginCount { id: id.to_string() });
        Ok(())
    }

    async fn commit(self) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.check(MockOperation::Commit)?;

        if let Some(racer) = state.racing_insert.take() {
            let id = state.allocate_id();
            state
                .profiles
                .insert(id.clone(), Profile::from_new(id, racer));
        }

        let mut profiles = state.profiles.clone();
        apply(&mut profiles, &self.staged)?;
        state.profiles = profiles;
        Ok(())
    }

    async fn rollback(self) -> Result<(), DomainError> {
        Ok(())
    }
}

fn find_phone<'a>(
    profiles: &'a BTreeMap<String, Profile>,
    phone_number: &str,
    excluding: Option<&str>,
) -> Option<&'a Profile> {
    profiles
        .values()
        .find(|p| p.phone_number == phone_number && Some(p.id.as_str()) != excluding)
}

fn unique_violation() -> DomainError {
    DomainError::UniqueViolation {
        constraint: PHONE_UNIQUE_CONSTRAINT.to_string(),
    }
}

/// Apply staged writes in order, enforcing the phone-number constraint
fn apply(profiles: &mut BTreeMap<String, Profile>, staged: &[StagedWrite]) -> Result<(), DomainError> {
    for write in staged {
        match write {
            StagedWrite::Insert(profile) => {
                if find_phone(profiles, &profile.phone_number, None).is_some() {
                    return Err(unique_violation());
                }
                profiles.insert(profile.id.clone(), profile.clone());
            }
            StagedWrite::Update {
                id,
                full_name,
                phone_number,
            } => {
                if find_phone(profiles, phone_number, Some(id)).is_some() {
                    return Err(unique_violation());
                }
                if let Some(profile) = profiles.get_mut(id) {
                    profile.rename(full_name, phone_number);
                }
            }
            StagedWrite::IncrementLoginCount { id } => {
                if let Some(profile) = profiles.get_mut(id) {
                    profile.record_login();
                }
            }
        }
    }
    Ok(())
}
