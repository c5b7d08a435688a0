//! Service layer for creating, viewing, and editing member profiles.

use crate::authz::domain::Actor;
use crate::profile::{
    domain::{
        BankAccount, BankAccountId, BankDetails, Profile, ProfileDomainError, ProfileView,
        UserIdentity, UserSummary, Username,
    },
    ports::{BankAccountRepository, ProfileRepository, ProfileRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for editing a member's payout details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBankDetailsRequest {
    bank_account: String,
    sorting_number: String,
    bank_name: String,
    default_account: Option<BankAccountId>,
}

impl UpdateBankDetailsRequest {
    /// Creates a request with the three payout fields.
    #[must_use]
    pub fn new(
        bank_account: impl Into<String>,
        sorting_number: impl Into<String>,
        bank_name: impl Into<String>,
    ) -> Self {
        Self {
            bank_account: bank_account.into(),
            sorting_number: sorting_number.into(),
            bank_name: bank_name.into(),
            default_account: None,
        }
    }

    /// Sets the preferred organisation account.
    #[must_use]
    pub const fn with_default_account(mut self, account: BankAccountId) -> Self {
        self.default_account = Some(account);
        self
    }
}

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProfileDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
    /// No profile exists for the username.
    #[error("no profile for user {0}")]
    NotFound(Username),
    /// The actor may not access the profile.
    #[error("{actor} may not access the profile of {owner}")]
    Forbidden {
        /// Requesting user.
        actor: Username,
        /// Profile owner.
        owner: Username,
    },
    /// The referenced organisation account does not exist.
    #[error("unknown bank account: {0}")]
    UnknownBankAccount(BankAccountId),
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile orchestration service.
pub struct ProfileService<P, B, C>
where
    P: ProfileRepository,
    B: BankAccountRepository,
    C: Clock + Send + Sync,
{
    profiles: Arc<P>,
    accounts: Arc<B>,
    clock: Arc<C>,
}

impl<P, B, C> Clone for ProfileService<P, B, C>
where
    P: ProfileRepository,
    B: BankAccountRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
            accounts: Arc::clone(&self.accounts),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P, B, C> ProfileService<P, B, C>
where
    P: ProfileRepository,
    B: BankAccountRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(profiles: Arc<P>, accounts: Arc<B>, clock: Arc<C>) -> Self {
        Self {
            profiles,
            accounts,
            clock,
        }
    }

    /// Creates the profile on first sign-on, or refreshes names and email.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when persistence fails.
    pub async fn ensure_profile(&self, identity: UserIdentity) -> ProfileServiceResult<Profile> {
        if let Some(mut existing) = self.profiles.find_by_username(&identity.username).await? {
            if existing.identity() != &identity {
                existing.refresh_identity(identity, &*self.clock);
                self.profiles.update(&existing).await?;
            }
            return Ok(existing);
        }

        let profile = Profile::new(identity, &*self.clock);
        self.profiles.store(&profile).await?;
        tracing::info!(username = %profile.username(), "created profile");
        Ok(profile)
    }

    /// Looks up a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find(&self, username: &Username) -> ProfileServiceResult<Option<Profile>> {
        Ok(self.profiles.find_by_username(username).await?)
    }

    /// Looks up a profile, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] for unknown users.
    pub async fn require(&self, username: &Username) -> ProfileServiceResult<Profile> {
        self.find(username)
            .await?
            .ok_or_else(|| ProfileServiceError::NotFound(username.clone()))
    }

    /// Returns the compact projection of a user.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] for unknown users.
    pub async fn summary(&self, username: &Username) -> ProfileServiceResult<UserSummary> {
        let profile = self.require(username).await?;
        Ok(UserSummary::from(&profile))
    }

    /// Returns the full profile projection when the actor may see it.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Forbidden`] unless the actor is the
    /// owner or an administrator, and [`ProfileServiceError::NotFound`] for
    /// unknown users.
    pub async fn view(
        &self,
        actor: &Actor,
        username: &Username,
    ) -> ProfileServiceResult<ProfileView> {
        if !actor.may_view_profile(username) {
            return Err(forbidden(actor, username));
        }
        let profile = self.require(username).await?;
        self.project(&profile).await
    }

    /// Replaces the owner's payout details.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Forbidden`] when the actor is not the
    /// owner, [`ProfileServiceError::Domain`] when a field is too long, and
    /// [`ProfileServiceError::UnknownBankAccount`] when the default account
    /// does not exist.
    pub async fn update_bank_details(
        &self,
        actor: &Actor,
        username: &Username,
        request: UpdateBankDetailsRequest,
    ) -> ProfileServiceResult<ProfileView> {
        if !actor.is(username) {
            return Err(forbidden(actor, username));
        }
        let UpdateBankDetailsRequest {
            bank_account,
            sorting_number,
            bank_name,
            default_account,
        } = request;
        let details = BankDetails::new(bank_account, sorting_number, bank_name)?;
        if let Some(account_id) = default_account {
            self.accounts
                .find_by_id(account_id)
                .await?
                .ok_or(ProfileServiceError::UnknownBankAccount(account_id))?;
        }

        let mut profile = self.require(username).await?;
        profile.update_bank_details(details, default_account, &*self.clock);
        self.profiles.update(&profile).await?;
        tracing::info!(%username, "updated bank details");
        self.project(&profile).await
    }

    /// Records the owner's push-notification instance identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] when the actor has no
    /// profile.
    pub async fn register_device(
        &self,
        actor: &Actor,
        instance_id: impl Into<String> + Send,
    ) -> ProfileServiceResult<()> {
        let mut profile = self.require(actor.username()).await?;
        profile.set_firebase_instance_id(instance_id, &*self.clock);
        self.profiles.update(&profile).await?;
        Ok(())
    }

    /// Registers a new organisation bank account.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Domain`] for an empty name.
    pub async fn create_bank_account(
        &self,
        name: impl Into<String> + Send,
    ) -> ProfileServiceResult<BankAccount> {
        let account = BankAccount::new(name)?;
        self.accounts.store(&account).await?;
        Ok(account)
    }

    /// Looks up an organisation bank account.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::UnknownBankAccount`] when missing.
    pub async fn bank_account(&self, id: BankAccountId) -> ProfileServiceResult<BankAccount> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or(ProfileServiceError::UnknownBankAccount(id))
    }

    /// Lists organisation bank accounts by name.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when persistence fails.
    pub async fn list_bank_accounts(&self) -> ProfileServiceResult<Vec<BankAccount>> {
        Ok(self.accounts.list_all().await?)
    }

    async fn project(&self, profile: &Profile) -> ProfileServiceResult<ProfileView> {
        let default_account = match profile.default_account() {
            Some(id) => self.accounts.find_by_id(id).await?,
            None => None,
        };
        Ok(ProfileView::new(profile, default_account.as_ref()))
    }
}

fn forbidden(actor: &Actor, owner: &Username) -> ProfileServiceError {
    ProfileServiceError::Forbidden {
        actor: actor.username().clone(),
        owner: owner.clone(),
    }
}
