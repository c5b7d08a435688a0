//! Port for the external service that lists a user's roles.

use crate::profile::domain::Username;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for permission source operations.
pub type PermissionSourceResult<T> = Result<T, PermissionSourceError>;

/// Source of raw role strings per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Returns every role string granted to the user in this system.
    ///
    /// Users unknown to the service have no roles.
    async fn roles_for(&self, username: &Username) -> PermissionSourceResult<Vec<String>>;
}

/// Errors returned by permission source adapters.
#[derive(Debug, Clone, Error)]
pub enum PermissionSourceError {
    /// The service could not be reached or answered with an error status.
    #[error("permission service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The service answered with a payload that is not a role list.
    #[error("invalid permission service response: {0}")]
    InvalidResponse(String),
}

impl PermissionSourceError {
    /// Wraps a transport error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
