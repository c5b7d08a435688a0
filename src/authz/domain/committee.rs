//! Case-insensitive committee names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Committee (budget owner) name used to match role grants.
///
/// Matching against the permission service is case-insensitive, so the
/// name is stored trimmed and lowercased. The original spelling is kept for
/// display by the expense context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitteeName(String);

impl CommitteeName {
    /// Normalises a committee name.
    ///
    /// Returns `None` when the value is empty after trimming.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        Some(Self(normalized))
    }

    /// Returns the normalised name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CommitteeName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CommitteeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
