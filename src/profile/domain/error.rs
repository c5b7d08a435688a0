//! Error types for profile domain validation.

use thiserror::Error;

/// Errors returned while constructing profile domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username contains whitespace or control characters.
    #[error("username '{0}' contains invalid characters")]
    InvalidUsername(String),

    /// The username exceeds the storage limit.
    #[error("username exceeds 64 character limit: {0}")]
    UsernameTooLong(String),

    /// A bank detail field exceeds its storage limit.
    #[error("{field} exceeds {max} character limit: {value}")]
    BankFieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum permitted character count.
        max: usize,
        /// Rejected value.
        value: String,
    },

    /// The organisation bank account name is empty after trimming.
    #[error("bank account name must not be empty")]
    EmptyBankAccountName,
}
