//! Profile entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered profile as stored
///
/// The password hash never leaves the service boundary: it is skipped when
/// serializing and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Store-assigned identifier, immutable once created
    pub id: String,

    /// Display name
    pub full_name: String,

    /// Login identifier, unique across all profiles
    pub phone_number: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Number of successful logins
    pub success_login_count: i64,

    /// Timestamp when the profile was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Materialise a stored profile from an insert request
    pub fn from_new(id: impl Into<String>, new_profile: NewProfile) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            full_name: new_profile.full_name,
            phone_number: new_profile.phone_number,
            password_hash: new_profile.password_hash,
            success_login_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable contact details
    pub fn rename(&mut self, full_name: &str, phone_number: &str) {
        self.full_name = full_name.to_string();
        self.phone_number = phone_number.to_string();
        self.updated_at = Utc::now();
    }

    /// Record one successful login
    pub fn record_login(&mut self) {
        self.success_login_count += 1;
        self.updated_at = Utc::now();
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("id", &self.id)
            .field("full_name", &self.full_name)
            .field("phone_number", &self.phone_number)
            .field("password_hash", &"<redacted>")
            .field("success_login_count", &self.success_login_count)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Fields supplied when inserting a profile; the store assigns the id
#[derive(Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub full_name: String,
    pub phone_number: String,
    pub password_hash: String,
}

impl NewProfile {
    pub fn new(
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl fmt::Debug for NewProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewProfile")
            .field("full_name", &self.full_name)
            .field("phone_number", &self.phone_number)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
