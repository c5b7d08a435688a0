//! Exchanges sign-on tokens for member profiles.

use crate::auth::ports::{IdentityProvider, IdentityProviderError};
use crate::profile::{
    domain::Profile,
    ports::{BankAccountRepository, ProfileRepository},
    services::{ProfileService, ProfileServiceError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while signing a member in.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The login service failed.
    #[error(transparent)]
    Provider(#[from] IdentityProviderError),
    /// The profile could not be created or refreshed.
    #[error(transparent)]
    Profile(#[from] ProfileServiceError),
}

/// Result type for login operations.
pub type LoginResult<T> = Result<T, LoginError>;

/// Sign-on orchestration service.
#[derive(Clone)]
pub struct LoginService<I, P, B, C>
where
    I: IdentityProvider,
    P: ProfileRepository,
    B: BankAccountRepository,
    C: Clock + Send + Sync,
{
    provider: Arc<I>,
    profiles: ProfileService<P, B, C>,
    frontend_url: String,
}

impl<I, P, B, C> LoginService<I, P, B, C>
where
    I: IdentityProvider,
    P: ProfileRepository,
    B: BankAccountRepository,
    C: Clock + Send + Sync,
{
    /// Creates a login service redirecting to `frontend_url`.
    #[must_use]
    pub fn new(provider: Arc<I>, profiles: ProfileService<P, B, C>, frontend_url: &str) -> Self {
        Self {
            provider,
            profiles,
            frontend_url: frontend_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the login page URL that calls back to `callback` with a token.
    #[must_use]
    pub fn login_url(&self, callback: &str) -> String {
        format!("{}/login?callback={callback}", self.frontend_url)
    }

    /// Verifies a token and ensures the member's profile is current.
    ///
    /// Returns `None` when the token is not accepted.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Provider`] when the login service fails and
    /// [`LoginError::Profile`] when the profile cannot be stored.
    pub async fn exchange(&self, token: &str) -> LoginResult<Option<Profile>> {
        let Some(identity) = self.provider.verify(token).await? else {
            return Ok(None);
        };
        let profile = self.profiles.ensure_profile(identity).await?;
        tracing::info!(username = %profile.username(), "member signed in");
        Ok(Some(profile))
    }
}
