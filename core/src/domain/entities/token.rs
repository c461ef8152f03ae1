//! Token claims for bearer authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 86400;

/// Name of the claim carrying the profile id
pub const PROFILE_ID_CLAIM: &str = "profile_id";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity of the authenticated profile
    pub profile_id: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Claims for `profile_id` valid for `expiry_seconds` from now
    pub fn for_profile(profile_id: impl Into<String>, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            profile_id: profile_id.into(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry_seconds)).timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_for_profile() {
        let claims = Claims::for_profile("profile-id-1", 60);
        assert_eq!(claims.profile_id, "profile-id-1");
        assert_eq!(claims.exp - claims.iat, 60);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claim_name_matches_field() {
        let json = serde_json::to_value(Claims::for_profile("abc", 60)).unwrap();
        assert_eq!(json[PROFILE_ID_CLAIM], "abc");
    }
}
