//! HTTP client for the organisation's login service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::auth::ports::{IdentityProvider, IdentityProviderError, IdentityProviderResult};
use crate::profile::domain::{UserIdentity, Username};

/// Identity provider that verifies tokens against the login service.
///
/// Tokens are checked with `GET {base_url}/verify/{token}.json?api_key=…`.
/// Any non-success status means the token is not valid.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Payload answered for a valid token.
#[derive(Debug, Deserialize)]
struct VerifiedUser {
    user: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    emails: String,
}

impl HttpIdentityProvider {
    /// Creates a client for the login service.
    #[must_use]
    pub fn new(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        }
    }

    fn verify_url(&self, token: &str) -> String {
        format!("{}/verify/{token}.json", self.base_url)
    }
}

fn is_plain_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify(&self, token: &str) -> IdentityProviderResult<Option<UserIdentity>> {
        if !is_plain_token(token) {
            tracing::debug!("rejected malformed login token");
            return Ok(None);
        }
        let response = self
            .client
            .get(self.verify_url(token))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(IdentityProviderError::unavailable)?;

        let status = response.status();
        if status.is_server_error() {
            return Err(IdentityProviderError::InvalidResponse(format!(
                "login service answered {status}"
            )));
        }
        if !status.is_success() {
            tracing::debug!(%status, "login token not accepted");
            return Ok(None);
        }
        let body = response
            .text()
            .await
            .map_err(IdentityProviderError::unavailable)?;
        parse_identity(&body).map(Some)
    }
}

/// Parses the login service's verification payload.
///
/// # Errors
///
/// Returns [`IdentityProviderError::InvalidResponse`] for malformed payloads
/// or invalid usernames.
pub fn parse_identity(body: &str) -> IdentityProviderResult<UserIdentity> {
    let verified: VerifiedUser = serde_json::from_str(body)
        .map_err(|err| IdentityProviderError::InvalidResponse(err.to_string()))?;
    let username = Username::new(verified.user)
        .map_err(|err| IdentityProviderError::InvalidResponse(err.to_string()))?;
    Ok(UserIdentity::new(
        username,
        verified.first_name,
        verified.last_name,
        verified.emails,
    ))
}

#[cfg(test)]
mod tests {
    use super::{HttpIdentityProvider, is_plain_token, parse_identity};
    use crate::auth::ports::IdentityProviderError;
    use reqwest::Client;
    use rstest::rstest;

    #[rstest]
    fn parses_verified_user() {
        let identity = parse_identity(
            r#"{"user":"Alice","first_name":"Alice","last_name":"Svensson","emails":"alice@kth.se","ugkthid":"u1"}"#,
        )
        .expect("valid payload");

        assert_eq!(identity.username.as_str(), "alice");
        assert_eq!(identity.last_name, "Svensson");
        assert_eq!(identity.email, "alice@kth.se");
    }

    #[rstest]
    #[case(r#"{"first_name":"Alice"}"#)]
    #[case(r#"{"user":"two words"}"#)]
    #[case("not json")]
    fn rejects_unusable_payloads(#[case] body: &str) {
        assert!(matches!(
            parse_identity(body),
            Err(IdentityProviderError::InvalidResponse(_))
        ));
    }

    #[rstest]
    #[case("abc-123_XYZ", true)]
    #[case("", false)]
    #[case("../admin", false)]
    #[case("a?b", false)]
    fn only_plain_tokens_are_sent(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_plain_token(token), expected);
    }

    #[rstest]
    fn verify_url_strips_trailing_slash() {
        let provider = HttpIdentityProvider::new(Client::new(), "https://login.example/", "key");
        assert_eq!(
            provider.verify_url("tok"),
            "https://login.example/verify/tok.json"
        );
    }
}
