//! In-memory identity provider for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::auth::ports::{IdentityProvider, IdentityProviderError, IdentityProviderResult};
use crate::profile::domain::UserIdentity;

/// Identity provider backed by a fixed token table.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    tokens: Arc<RwLock<HashMap<String, UserIdentity>>>,
}

impl StaticIdentityProvider {
    /// Creates a provider that accepts no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for an identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Unavailable`] when lock acquisition
    /// fails.
    pub fn issue(
        &self,
        token: impl Into<String>,
        identity: UserIdentity,
    ) -> IdentityProviderResult<()> {
        let mut tokens = self.tokens.write().map_err(|err| {
            IdentityProviderError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        tokens.insert(token.into(), identity);
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn verify(&self, token: &str) -> IdentityProviderResult<Option<UserIdentity>> {
        let tokens = self.tokens.read().map_err(|err| {
            IdentityProviderError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        Ok(tokens.get(token).cloned())
    }
}
