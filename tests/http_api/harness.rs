//! Test server wiring the router over in-memory adapters.

use std::sync::Arc;

use cashflow::api::{AppState, SessionKeys, backends::MemoryBackend, router};
use cashflow::auth::adapters::memory::StaticIdentityProvider;
use cashflow::authz::adapters::memory::StaticPermissionSource;
use cashflow::expense::adapters::memory::RecordingCommentNotifier;
use cashflow::profile::domain::{UserIdentity, Username};
use eyre::WrapErr;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Secret the test server signs sessions with.
pub const SESSION_SECRET: &str = "integration-test-secret";

/// Running server plus handles on its static token and role tables.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    pub identity: Arc<StaticIdentityProvider>,
    pub permissions: Arc<StaticPermissionSource>,
    pub notifier: Arc<RecordingCommentNotifier>,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Signed-on member and their bearer token.
pub struct Member {
    pub username: String,
    pub token: String,
}

impl TestServer {
    /// Binds an ephemeral port and serves the router on it.
    pub async fn spawn() -> eyre::Result<Self> {
        let identity = Arc::new(StaticIdentityProvider::new());
        let permissions = Arc::new(StaticPermissionSource::new());
        let notifier = Arc::new(RecordingCommentNotifier::new());
        let adapters = MemoryBackend::adapters(
            Arc::clone(&identity),
            Arc::clone(&permissions),
            Arc::clone(&notifier),
        );
        let state = AppState::new(
            adapters,
            SessionKeys::from_secret(SESSION_SECRET),
            "https://login.example.org",
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .wrap_err("bind test listener")?;
        let address = listener.local_addr().wrap_err("read listener address")?;
        let app = router(Arc::new(state));
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "test server stopped");
            }
        });

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .wrap_err("build HTTP client")?;

        Ok(Self {
            base_url: format!("http://{address}"),
            client,
            identity,
            permissions,
            notifier,
            handle,
        })
    }

    /// Returns an absolute URL for a path on the server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Starts an authenticated request.
    pub fn get(&self, member: &Member, path: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(&member.token)
    }

    /// Starts an authenticated request.
    pub fn post(&self, member: &Member, path: &str) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(&member.token)
    }

    /// Registers a login token and role set, then exchanges the token for a
    /// session.
    pub async fn sign_in(
        &self,
        raw: &str,
        first_name: &str,
        roles: &[&str],
    ) -> eyre::Result<Member> {
        let username = Username::new(raw).wrap_err("parse username")?;
        self.permissions
            .grant(&username, roles.iter().copied())
            .wrap_err("grant roles")?;
        let login_token = format!("login-{raw}");
        self.identity
            .issue(
                login_token.clone(),
                UserIdentity::new(username, first_name, "Medlem", format!("{raw}@example.org")),
            )
            .wrap_err("issue login token")?;

        let body: Value = self
            .client
            .get(self.url(&format!("/login/{login_token}")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let token = body["token"]
            .as_str()
            .ok_or_else(|| eyre::eyre!("login response without token: {body}"))?
            .to_owned();
        Ok(Member {
            username: raw.to_owned(),
            token,
        })
    }
}

/// Reads a JSON body after checking the status code.
pub async fn json_with_status(response: Response, expected: u16) -> eyre::Result<Value> {
    let status = response.status().as_u16();
    let body: Value = response.json().await.wrap_err("decode JSON body")?;
    if status != expected {
        return Err(eyre::eyre!("expected status {expected}, got {status}: {body}"));
    }
    Ok(body)
}

/// Body of a one-part expense charged to the given committee.
pub fn expense_body(description: &str, committee: &str, amount: &str) -> Value {
    serde_json::json!({
        "description": description,
        "expense_date": "2024-03-14",
        "parts": [{
            "committee_id": 1,
            "committee_name": committee,
            "cost_centre_id": 2,
            "cost_centre_name": "Verksamhet",
            "budget_line_id": 3,
            "budget_line_name": "Fika",
            "amount": amount,
        }],
    })
}

/// Extracts a string field from a JSON object.
pub fn field<'a>(value: &'a Value, name: &str) -> eyre::Result<&'a str> {
    value[name]
        .as_str()
        .ok_or_else(|| eyre::eyre!("missing string field {name} in {value}"))
}
