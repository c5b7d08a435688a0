//! In-memory repositories for profile tests and local runs.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::profile::{
    domain::{BankAccount, BankAccountId, Profile, Username},
    ports::{
        BankAccountRepository, ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult,
    },
};

/// Thread-safe in-memory profile repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<BTreeMap<Username, Profile>>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> ProfileRepositoryError {
    ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        if profiles.contains_key(profile.username()) {
            return Err(ProfileRepositoryError::DuplicateProfile(
                profile.username().clone(),
            ));
        }
        profiles.insert(profile.username().clone(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        let slot = profiles
            .get_mut(profile.username())
            .ok_or_else(|| ProfileRepositoryError::NotFound(profile.username().clone()))?;
        *slot = profile.clone();
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> ProfileRepositoryResult<Option<Profile>> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles.get(username).cloned())
    }

    async fn list_all(&self) -> ProfileRepositoryResult<Vec<Profile>> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles.values().cloned().collect())
    }
}

/// Thread-safe in-memory organisation bank account repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBankAccountRepository {
    accounts: Arc<RwLock<HashMap<BankAccountId, BankAccount>>>,
}

impl InMemoryBankAccountRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BankAccountRepository for InMemoryBankAccountRepository {
    async fn store(&self, account: &BankAccount) -> ProfileRepositoryResult<()> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.contains_key(&account.id()) {
            return Err(ProfileRepositoryError::DuplicateBankAccount(account.id()));
        }
        accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BankAccountId) -> ProfileRepositoryResult<Option<BankAccount>> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.get(&id).cloned())
    }

    async fn list_all(&self) -> ProfileRepositoryResult<Vec<BankAccount>> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        let mut listed: Vec<BankAccount> = accounts.values().cloned().collect();
        listed.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(listed)
    }
}
