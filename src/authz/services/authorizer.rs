//! Resolves signed-on users into actors with grants.

use crate::authz::{
    domain::{Actor, Grants},
    ports::{PermissionSource, PermissionSourceError},
};
use crate::profile::domain::{ProfileDomainError, Username};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for actor resolution.
#[derive(Debug, Error)]
pub enum AuthorizerError {
    /// The username failed validation.
    #[error(transparent)]
    Domain(#[from] ProfileDomainError),
    /// The permission service failed.
    #[error(transparent)]
    Source(#[from] PermissionSourceError),
}

/// Result type for actor resolution.
pub type AuthorizerResult<T> = Result<T, AuthorizerError>;

/// Permission oracle: turns a username into an [`Actor`].
#[derive(Clone)]
pub struct Authorizer<S>
where
    S: PermissionSource,
{
    source: Arc<S>,
}

impl<S> Authorizer<S>
where
    S: PermissionSource,
{
    /// Creates an authorizer over a permission source.
    #[must_use]
    pub const fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Fetches the user's roles and resolves them into grants.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizerError::Source`] when the permission service fails.
    pub async fn actor(&self, username: &Username) -> AuthorizerResult<Actor> {
        let roles = self.source.roles_for(username).await?;
        let grants = Grants::from_roles(&roles);
        tracing::debug!(
            %username,
            role_count = roles.len(),
            admin = grants.is_admin(),
            "resolved actor grants"
        );
        Ok(Actor::new(username.clone(), grants))
    }

    /// Resolves an actor from a raw username string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizerError::Domain`] when the username is invalid, or
    /// [`AuthorizerError::Source`] when the permission service fails.
    pub async fn actor_by_name(&self, username: &str) -> AuthorizerResult<Actor> {
        let parsed = Username::new(username)?;
        self.actor(&parsed).await
    }
}
