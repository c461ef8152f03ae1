//! Main profile service implementation

use std::sync::Arc;

use ps_shared::utils::phone::mask_phone_number;
use tracing::{error, info, warn};

use crate::domain::entities::NewProfile;
use crate::domain::value_objects::ProfileSummary;
use crate::errors::{AuthError, DomainError, DomainResult, ProfileError};
use crate::repositories::{commit_or_rollback, ProfileRepository, ProfileTransaction};
use crate::services::credential::CredentialHelper;

/// Profile service orchestrating the store and the credential helper
pub struct ProfileService<R, C>
where
    R: ProfileRepository,
    C: CredentialHelper + ?Sized,
{
    /// Profile store
    repository: Arc<R>,
    /// Password hashing and token issuance
    credentials: Arc<C>,
}

impl<R, C> ProfileService<R, C>
where
    R: ProfileRepository,
    C: CredentialHelper + ?Sized,
{
    /// Create a new profile service
    pub fn new(repository: Arc<R>, credentials: Arc<C>) -> Self {
        Self {
            repository,
            credentials,
        }
    }

    /// Credential helper shared with the request boundary
    pub fn credentials(&self) -> Arc<C> {
        Arc::clone(&self.credentials)
    }

    /// Register a new profile and return its id
    ///
    /// The phone-number check and the insert share one transaction. A number
    /// that is already taken, whether seen by the check or rejected by the
    /// store constraint, yields [`ProfileError::DataConflict`].
    pub async fn register(
        &self,
        full_name: &str,
        phone_number: &str,
        password: &str,
    ) -> DomainResult<String> {
        let password_hash = self.credentials.hash_password(password).map_err(|e| {
            let reason = describe(&e);
            error!(error = %reason, "Failed to hash password");
            ProfileError::RegistrationFailed { reason }
        })?;

        let mut tx = self.repository.begin().await.map_err(|e| {
            error!(error = %e, "Failed to open registration transaction");
            ProfileError::RegistrationFailed {
                reason: e.to_string(),
            }
        })?;
        let outcome = insert_if_phone_free(
            &mut tx,
            NewProfile::new(full_name, phone_number, password_hash),
        )
        .await;
        let profile_id = commit_or_rollback(tx, outcome)
            .await
            .map_err(conflict_on_unique_violation)?;

        info!(
            profile_id = %profile_id,
            phone = %mask_phone_number(phone_number),
            "Registered new profile"
        );
        Ok(profile_id)
    }

    /// Authenticate by phone number and password and return a bearer token
    ///
    /// The success-login counter is incremented in a transaction, and the
    /// token is only handed out once that transaction has committed.
    pub async fn login(&self, phone_number: &str, password: &str) -> DomainResult<String> {
        let masked = mask_phone_number(phone_number);

        let profile = match self.repository.find_by_phone(phone_number).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                warn!(phone = %masked, "Login attempt for unknown phone number");
                return Err(ProfileError::InvalidCredentials.into());
            }
            Err(e) => {
                error!(phone = %masked, error = %e, "Failed to look up profile for login");
                return Err(ProfileError::LoginFailed {
                    reason: e.to_string(),
                }
                .into());
            }
        };

        match self
            .credentials
            .verify_password(password, &profile.password_hash)
        {
            Ok(()) => {}
            Err(AuthError::PasswordMismatch) => {
                warn!(profile_id = %profile.id, "Login attempt with wrong password");
                return Err(ProfileError::InvalidCredentials.into());
            }
            Err(e) => {
                let reason = describe(&e);
                error!(profile_id = %profile.id, error = %reason, "Failed to verify password");
                return Err(ProfileError::LoginFailed { reason }.into());
            }
        }

        let mut tx = self.repository.begin().await.map_err(|e| {
            error!(profile_id = %profile.id, error = %e, "Failed to open login transaction");
            ProfileError::LoginFailed {
                reason: e.to_string(),
            }
        })?;
        let outcome = self.record_login(&mut tx, &profile.id).await;
        let token = commit_or_rollback(tx, outcome).await?;

        info!(profile_id = %profile.id, "Profile logged in");
        Ok(token)
    }

    /// Fetch name and phone number of a profile
    pub async fn get_profile(&self, profile_id: &str) -> DomainResult<ProfileSummary> {
        match self.repository.find_by_id(profile_id).await {
            Ok(Some(profile)) => Ok(profile.into()),
            Ok(None) => {
                warn!(profile_id = %profile_id, "Profile not found");
                Err(ProfileError::ProfileNotFound.into())
            }
            Err(e) => {
                error!(profile_id = %profile_id, error = %e, "Failed to load profile");
                Err(ProfileError::GetProfileFailed {
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }

    /// Replace name and phone number of a profile
    ///
    /// Any profile already holding the new number, including the one being
    /// updated, makes the update fail with [`ProfileError::DataConflict`]. An id
    /// with no row behind it yields [`ProfileError::ProfileNotFound`].
    pub async fn update_profile(
        &self,
        profile_id: &str,
        full_name: &str,
        phone_number: &str,
    ) -> DomainResult<()> {
        let mut tx = self.repository.begin().await.map_err(|e| {
            error!(profile_id = %profile_id, error = %e, "Failed to open update transaction");
            ProfileError::UpdateProfileFailed {
                reason: e.to_string(),
            }
        })?;
        let outcome = update_if_phone_free(&mut tx, profile_id, full_name, phone_number).await;
        commit_or_rollback(tx, outcome)
            .await
            .map_err(conflict_on_unique_violation)?;

        info!(
            profile_id = %profile_id,
            phone = %mask_phone_number(phone_number),
            "Updated profile"
        );
        Ok(())
    }

    async fn record_login(&self, tx: &mut R::Tx, profile_id: &str) -> DomainResult<String> {
        tx.increment_login_count(profile_id).await.map_err(|e| {
            error!(profile_id = %profile_id, error = %e, "Failed to increment login count");
            ProfileError::LoginFailed {
                reason: e.to_string(),
            }
        })?;

        let token = self.credentials.generate_token(profile_id).map_err(|e| {
            let reason = describe(&e);
            error!(profile_id = %profile_id, error = %reason, "Failed to generate token");
            ProfileError::LoginFailed { reason }
        })?;

        Ok(token)
    }
}

async fn insert_if_phone_free<X>(tx: &mut X, profile: NewProfile) -> DomainResult<String>
where
    X: ProfileTransaction,
{
    let masked = mask_phone_number(&profile.phone_number);

    match tx.find_by_phone(&profile.phone_number).await {
        Ok(Some(_)) => {
            warn!(phone = %masked, "Registration rejected, phone number already registered");
            return Err(ProfileError::DataConflict.into());
        }
        Ok(None) => {}
        Err(e) => {
            error!(phone = %masked, error = %e, "Failed to check phone number");
            return Err(ProfileError::RegistrationFailed {
                reason: e.to_string(),
            }
            .into());
        }
    }

    tx.insert_profile(profile).await.map_err(|e| match e {
        DomainError::UniqueViolation { .. } => {
            warn!(phone = %masked, "Registration rejected by phone number constraint");
            ProfileError::DataConflict.into()
        }
        other => {
            error!(phone = %masked, error = %other, "Failed to insert profile");
            ProfileError::RegistrationFailed {
                reason: other.to_string(),
            }
            .into()
        }
    })
}

async fn update_if_phone_free<X>(
    tx: &mut X,
    profile_id: &str,
    full_name: &str,
    phone_number: &str,
) -> DomainResult<()>
where
    X: ProfileTransaction,
{
    match tx.find_by_phone(phone_number).await {
        Ok(Some(existing)) => {
            warn!(
                profile_id = %profile_id,
                holder = %existing.id,
                "Update rejected, phone number already registered"
            );
            return Err(ProfileError::DataConflict.into());
        }
        Ok(None) => {}
        Err(e) => {
            error!(profile_id = %profile_id, error = %e, "Failed to check phone number");
            return Err(ProfileError::UpdateProfileFailed {
                reason: e.to_string(),
            }
            .into());
        }
    }

    match tx
        .update_profile_by_id(profile_id, full_name, phone_number)
        .await
    {
        Ok(true) => Ok(()),
        Ok(false) => {
            warn!(profile_id = %profile_id, "Update targeted a missing profile");
            Err(ProfileError::ProfileNotFound.into())
        }
        Err(DomainError::UniqueViolation { .. }) => Err(ProfileError::DataConflict.into()),
        Err(e) => {
            error!(profile_id = %profile_id, error = %e, "Failed to update profile");
            Err(ProfileError::UpdateProfileFailed {
                reason: e.to_string(),
            }
            .into())
        }
    }
}

/// Commit-time constraint rejections are conflicts; every other error passes through
fn conflict_on_unique_violation(error: DomainError) -> DomainError {
    match error {
        DomainError::UniqueViolation { constraint } => {
            warn!(constraint = %constraint, "Commit rejected by unique constraint");
            ProfileError::DataConflict.into()
        }
        other => other,
    }
}

/// Display text of a credential failure with its underlying cause appended
fn describe(error: &AuthError) -> String {
    match error {
        AuthError::HashingFailed { reason } | AuthError::TokenGenerationFailed { reason } => {
            format!("{}: {}", error, reason)
        }
        other => other.to_string(),
    }
}
