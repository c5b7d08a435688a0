//! Ledger verification references.

use super::ExpenseDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_VERIFICATION_LENGTH: usize = 7;

/// Reference of the ledger posting an expense was booked under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Verification(String);

impl Verification {
    /// Creates a validated verification reference.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::InvalidVerification`] when the value is
    /// empty after trimming or longer than seven characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ExpenseDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_VERIFICATION_LENGTH {
            return Err(ExpenseDomainError::InvalidVerification(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Verification {
    type Error = ExpenseDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Verification> for String {
    fn from(value: Verification) -> Self {
        value.0
    }
}
