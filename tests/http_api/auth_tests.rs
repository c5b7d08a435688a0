//! Sign-on and session handling over HTTP.

use super::harness::{SESSION_SECRET, TestServer, field, json_with_status};
use cashflow::api::SessionKeys;
use cashflow::profile::domain::Username;
use chrono::{Duration, Utc};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_needs_no_session() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;

    let response = server.client.get(server.url("/api/health")).send().await?;

    let body = json_with_status(response, 200).await?;
    assert_eq!(field(&body, "status")?, "ok");
    Ok(())
}

#[rstest]
#[case("/api/expenses")]
#[case("/api/me")]
#[case("/api/queues/attest")]
#[tokio::test(flavor = "multi_thread")]
async fn protected_routes_reject_missing_session(#[case] path: &str) -> eyre::Result<()> {
    let server = TestServer::spawn().await?;

    let response = server.client.get(server.url(path)).send().await?;

    assert_eq!(response.status().as_u16(), 401);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tampered_session_is_rejected() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let foreign = SessionKeys::from_secret("some-other-secret")
        .issue(&Username::new("mallory")?, Utc::now())?;

    let response = server
        .client
        .get(server.url("/api/me"))
        .bearer_auth(&foreign.token)
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 401);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_login_token_is_unauthenticated() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;

    let response = server
        .client
        .get(server.url("/login/not-a-real-token"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 401);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_redirects_to_login_frontend() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;

    let response = server
        .client
        .get(server.url("/login?callback=https://cashflow.example.org/token/"))
        .send()
        .await?;

    assert!(response.status().is_redirection());
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| eyre::eyre!("redirect without location"))?;
    assert!(location.starts_with("https://login.example.org/login?callback="));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_creates_profile_and_session() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;

    let response = server.get(&alice, "/api/me").send().await?;

    let profile = json_with_status(response, 200).await?;
    assert_eq!(field(&profile, "username")?, "alice");
    assert_eq!(field(&profile, "first_name")?, "Alice");
    assert!(profile["default_account"].is_null());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn session_token_outlives_a_day() -> eyre::Result<()> {
    let keys = SessionKeys::from_secret(SESSION_SECRET);
    let now = Utc::now();

    let session = keys.issue(&Username::new("alice")?, now)?;

    assert!(session.expires_at > now + Duration::days(1));
    assert_eq!(keys.verify(&session.token)?.as_str(), "alice");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn logout_answers_no_content() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;

    let response = server.client.post(server.url("/logout")).send().await?;

    assert_eq!(response.status().as_u16(), 204);
    Ok(())
}
