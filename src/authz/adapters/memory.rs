//! In-memory permission source for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::authz::ports::{PermissionSource, PermissionSourceError, PermissionSourceResult};
use crate::profile::domain::Username;

/// Permission source backed by a fixed role table.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissionSource {
    roles: Arc<RwLock<HashMap<Username, Vec<String>>>>,
}

impl StaticPermissionSource {
    /// Creates a source in which nobody has any role.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the roles granted to a user.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionSourceError::Unavailable`] when lock acquisition
    /// fails.
    pub fn grant<I, S>(&self, username: &Username, roles: I) -> PermissionSourceResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = self.roles.write().map_err(|err| {
            PermissionSourceError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        table.insert(username.clone(), roles.into_iter().map(Into::into).collect());
        Ok(())
    }
}

#[async_trait]
impl PermissionSource for StaticPermissionSource {
    async fn roles_for(&self, username: &Username) -> PermissionSourceResult<Vec<String>> {
        let table = self.roles.read().map_err(|err| {
            PermissionSourceError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        Ok(table.get(username).cloned().unwrap_or_default())
    }
}
