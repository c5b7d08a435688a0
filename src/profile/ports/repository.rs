//! Repository ports for profile and organisation bank account persistence.

use crate::profile::domain::{BankAccount, BankAccountId, Profile, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Stores a new profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateProfile`] when a profile
    /// already exists for the username.
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()>;

    /// Persists changes to an existing profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::NotFound`] when the profile does not
    /// exist.
    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()>;

    /// Finds a profile by username.
    ///
    /// Returns `None` when the user has never signed on.
    async fn find_by_username(&self, username: &Username)
    -> ProfileRepositoryResult<Option<Profile>>;

    /// Returns all profiles ordered by username.
    async fn list_all(&self) -> ProfileRepositoryResult<Vec<Profile>>;
}

/// Organisation bank account persistence contract.
#[async_trait]
pub trait BankAccountRepository: Send + Sync {
    /// Stores a new organisation bank account.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateBankAccount`] when the
    /// identifier already exists.
    async fn store(&self, account: &BankAccount) -> ProfileRepositoryResult<()>;

    /// Finds an account by identifier.
    async fn find_by_id(&self, id: BankAccountId) -> ProfileRepositoryResult<Option<BankAccount>>;

    /// Returns all accounts ordered by name.
    async fn list_all(&self) -> ProfileRepositoryResult<Vec<BankAccount>>;
}

/// Errors returned by profile and bank account repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// A profile for the username already exists.
    #[error("duplicate profile: {0}")]
    DuplicateProfile(Username),

    /// The profile was not found.
    #[error("profile not found: {0}")]
    NotFound(Username),

    /// A bank account with the same identifier already exists.
    #[error("duplicate bank account identifier: {0}")]
    DuplicateBankAccount(BankAccountId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
