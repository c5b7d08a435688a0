//! Validated username type.

use super::ProfileDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a username, matching the `VARCHAR(64)` column.
const MAX_USERNAME_LENGTH: usize = 64;

/// Login name issued by the single sign-on service.
///
/// Usernames are the natural key of a profile. They are trimmed and
/// lowercased on construction so comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyUsername`] when the value is empty
    /// after trimming, [`ProfileDomainError::UsernameTooLong`] when it exceeds
    /// 64 characters, or [`ProfileDomainError::InvalidUsername`] when it
    /// contains whitespace or control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProfileDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ProfileDomainError::EmptyUsername);
        }

        if normalized.chars().count() > MAX_USERNAME_LENGTH {
            return Err(ProfileDomainError::UsernameTooLong(raw));
        }

        if normalized
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '/')
        {
            return Err(ProfileDomainError::InvalidUsername(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ProfileDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
