//! Password hashing and token issuance

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ps_shared::utils::password::fits_hash_input;
use tracing::debug;

use crate::domain::entities::Claims;
use crate::errors::AuthError;

use super::config::CredentialConfig;

/// Password and bearer-token operations used by the profile service and the
/// HTTP authentication middleware
///
/// All operations are CPU-bound and perform no I/O.
pub trait CredentialHelper: Send + Sync {
    /// One-way salted hash of `password`, [`AuthError::PasswordTooLong`] when
    /// bcrypt would silently drop part of it
    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// `Ok(())` when `password` matches `hash`, [`AuthError::PasswordMismatch`]
    /// when it does not, [`AuthError::HashingFailed`] for any other failure
    ///
    /// A password too long to have been hashed never matches.
    fn verify_password(&self, password: &str, hash: &str) -> Result<(), AuthError>;

    /// Signed token binding `profile_id`
    fn generate_token(&self, profile_id: &str) -> Result<String, AuthError>;

    /// Profile id carried by a valid token; every other outcome is
    /// [`AuthError::InvalidToken`]
    fn verify_token(&self, token: &str) -> Result<String, AuthError>;
}

/// bcrypt + HS256 implementation of [`CredentialHelper`]
pub struct CredentialService {
    config: CredentialConfig,
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl CredentialService {
    /// Creates a new credential service instance
    pub fn new(config: CredentialConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Only HS256 is accepted; tokens declaring any other algorithm fail
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            config,
            header: Header::new(Algorithm::HS256),
            encoding_key,
            decoding_key,
            validation,
        }
    }
}

impl CredentialHelper for CredentialService {
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        if !fits_hash_input(password) {
            return Err(AuthError::PasswordTooLong);
        }
        bcrypt::hash(password, self.config.bcrypt_cost).map_err(|e| AuthError::HashingFailed {
            reason: e.to_string(),
        })
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<(), AuthError> {
        // bcrypt would compare only the leading 72 bytes
        if !fits_hash_input(password) {
            return Err(AuthError::PasswordMismatch);
        }
        match bcrypt::verify(password, hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AuthError::PasswordMismatch),
            Err(e) => Err(AuthError::HashingFailed {
                reason: e.to_string(),
            }),
        }
    }

    fn generate_token(&self, profile_id: &str) -> Result<String, AuthError> {
        let claims = Claims::for_profile(profile_id, self.config.token_expiry_seconds);
        encode(&self.header, &claims, &self.encoding_key).map_err(|e| {
            AuthError::TokenGenerationFailed {
                reason: e.to_string(),
            }
        })
    }

    fn verify_token(&self, token: &str) -> Result<String, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                debug!(kind = ?e.kind(), "Rejected bearer token");
                AuthError::InvalidToken
            })?;

        let profile_id = token_data.claims.profile_id;
        if profile_id.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(profile_id)
    }
}
