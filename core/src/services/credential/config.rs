//! Configuration for the credential service

use ps_shared::config::AuthConfig;

use crate::domain::entities::DEFAULT_TOKEN_EXPIRY_SECONDS;

/// Configuration for the credential service
#[derive(Debug, Clone)]
pub struct CredentialConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_expiry_seconds: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            token_expiry_seconds: DEFAULT_TOKEN_EXPIRY_SECONDS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl From<&AuthConfig> for CredentialConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            jwt_secret: config.jwt.secret.clone(),
            token_expiry_seconds: config.jwt.token_expiry,
            bcrypt_cost: config.password.bcrypt_cost,
        }
    }
}
