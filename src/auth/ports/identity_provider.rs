//! Port for the external login service that verifies sign-on tokens.

use crate::profile::domain::UserIdentity;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityProviderResult<T> = Result<T, IdentityProviderError>;

/// Verifies the one-time tokens issued by the login service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the identity behind a token, or `None` when the token is not
    /// valid.
    async fn verify(&self, token: &str) -> IdentityProviderResult<Option<UserIdentity>>;
}

/// Errors returned by identity provider adapters.
#[derive(Debug, Clone, Error)]
pub enum IdentityProviderError {
    /// The login service could not be reached or failed.
    #[error("login service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The login service answered with an unexpected payload.
    #[error("invalid login service response: {0}")]
    InvalidResponse(String),
}

impl IdentityProviderError {
    /// Wraps a transport error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
