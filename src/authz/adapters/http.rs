//! HTTP client for the organisation's permission service.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::authz::ports::{PermissionSource, PermissionSourceError, PermissionSourceResult};
use crate::profile::domain::Username;

/// Permission source that asks the permission service over HTTP.
///
/// Roles are fetched from `GET {base_url}/api/user/{username}/{system}`,
/// which answers with a JSON array of role strings.
#[derive(Debug, Clone)]
pub struct HttpPermissionSource {
    client: Client,
    base_url: String,
    system: String,
}

impl HttpPermissionSource {
    /// Creates a client for the given service URL and system name.
    #[must_use]
    pub fn new(client: Client, base_url: &str, system: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            system: system.into(),
        }
    }

    fn roles_url(&self, username: &Username) -> String {
        format!("{}/api/user/{}/{}", self.base_url, username, self.system)
    }
}

#[async_trait]
impl PermissionSource for HttpPermissionSource {
    async fn roles_for(&self, username: &Username) -> PermissionSourceResult<Vec<String>> {
        let url = self.roles_url(username);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(PermissionSourceError::unavailable)?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(%username, "user unknown to permission service");
            return Ok(Vec::new());
        }

        let checked = response
            .error_for_status()
            .map_err(PermissionSourceError::unavailable)?;
        let body = checked
            .text()
            .await
            .map_err(PermissionSourceError::unavailable)?;
        parse_roles(&body)
    }
}

/// Parses the service's JSON role list.
///
/// # Errors
///
/// Returns [`PermissionSourceError::InvalidResponse`] when the body is not a
/// JSON array of strings.
pub fn parse_roles(body: &str) -> PermissionSourceResult<Vec<String>> {
    serde_json::from_str::<Vec<String>>(body)
        .map_err(|err| PermissionSourceError::InvalidResponse(err.to_string()))
}
