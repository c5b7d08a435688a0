//! Bank account types: organisation accounts and member payout details.

use super::ProfileDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const MAX_BANK_ACCOUNT_LENGTH: usize = 13;
const MAX_SORTING_NUMBER_LENGTH: usize = 6;
const MAX_BANK_NAME_LENGTH: usize = 30;

/// Unique identifier for an organisation bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BankAccountId(Uuid);

impl BankAccountId {
    /// Creates a new random bank account identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a bank account identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for BankAccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BankAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A real bank account owned by the organisation.
///
/// Reimbursements are paid out from one of these accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    id: BankAccountId,
    name: String,
}

impl BankAccount {
    /// Creates a new organisation bank account.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyBankAccountName`] when the name is
    /// empty after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, ProfileDomainError> {
        Self::from_parts(BankAccountId::new(), name)
    }

    /// Reconstructs a bank account from persisted parts.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyBankAccountName`] when the name is
    /// empty after trimming.
    pub fn from_parts(
        id: BankAccountId,
        name: impl Into<String>,
    ) -> Result<Self, ProfileDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProfileDomainError::EmptyBankAccountName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
        })
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> BankAccountId {
        self.id
    }

    /// Returns the display name of the account.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Payout details a member registers for reimbursements.
///
/// Every field may be empty; a member who has not filled in their details
/// simply cannot be paid by bank transfer yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    bank_account: String,
    sorting_number: String,
    bank_name: String,
}

impl BankDetails {
    /// Creates validated bank details.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::BankFieldTooLong`] when any field exceeds
    /// its storage limit (13, 6, and 30 characters respectively).
    pub fn new(
        bank_account: impl Into<String>,
        sorting_number: impl Into<String>,
        bank_name: impl Into<String>,
    ) -> Result<Self, ProfileDomainError> {
        Ok(Self {
            bank_account: bounded("bank_account", bank_account.into(), MAX_BANK_ACCOUNT_LENGTH)?,
            sorting_number: bounded(
                "sorting_number",
                sorting_number.into(),
                MAX_SORTING_NUMBER_LENGTH,
            )?,
            bank_name: bounded("bank_name", bank_name.into(), MAX_BANK_NAME_LENGTH)?,
        })
    }

    /// Returns the member's account number.
    #[must_use]
    pub fn bank_account(&self) -> &str {
        &self.bank_account
    }

    /// Returns the clearing (sorting) number.
    #[must_use]
    pub fn sorting_number(&self) -> &str {
        &self.sorting_number
    }

    /// Returns the bank name.
    #[must_use]
    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }
}

fn bounded(field: &'static str, raw: String, max: usize) -> Result<String, ProfileDomainError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() > max {
        return Err(ProfileDomainError::BankFieldTooLong {
            field,
            max,
            value: raw,
        });
    }
    Ok(trimmed.to_owned())
}
