//! Public view of a profile returned by profile retrieval.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Profile;

/// Name and phone number of a profile; carries nothing secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub full_name: String,
    pub phone_number: String,
}

impl From<Profile> for ProfileSummary {
    fn from(profile: Profile) -> Self {
        Self {
            full_name: profile.full_name,
            phone_number: profile.phone_number,
        }
    }
}
