//! Receipt upload, download, and detachment over HTTP.

use super::harness::{Member, TestServer, expense_body, field, json_with_status};
use reqwest::multipart::{Form, Part};
use rstest::rstest;
use serde_json::Value;

const RECEIPT: &[u8] = b"%PDF-1.4 kvitto";

async fn upload(
    server: &TestServer,
    member: &Member,
    expense: Option<&str>,
) -> eyre::Result<Value> {
    let part = Part::bytes(RECEIPT.to_vec())
        .file_name("kvitto.pdf")
        .mime_str("application/pdf")?;
    let path = expense.map_or_else(
        || "/api/files".to_owned(),
        |id| format!("/api/files?expense={id}"),
    );
    let response = server
        .post(member, &path)
        .multipart(Form::new().part("file", part))
        .send()
        .await?;
    json_with_status(response, 201).await
}

async fn submit(server: &TestServer, owner: &Member) -> eyre::Result<String> {
    let response = server
        .post(owner, "/api/expenses")
        .json(&expense_body("Tågbiljett", "Drek", "420"))
        .send()
        .await?;
    let created = json_with_status(response, 201).await?;
    Ok(field(&created, "id")?.to_owned())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uploaded_receipt_is_served_back() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;

    let uploaded = upload(&server, &alice, None).await?;
    let url = uploaded[0]["url"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("receipt without url: {uploaded}"))?;
    let key = url.strip_prefix("memory://").unwrap_or(url);
    let response = server
        .client
        .get(server.url(&format!("/receipts/{key}")))
        .send()
        .await?;

    assert_eq!(uploaded[0]["is_image"].as_bool(), Some(false));
    assert!(uploaded[0]["expense"].is_null());
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/pdf")
    );
    assert_eq!(response.bytes().await?.as_ref(), RECEIPT);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upload_without_files_is_rejected() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;

    let response = server
        .post(&alice, "/api/files")
        .multipart(Form::new().text("note", "inga filer"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 400);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attaching_a_receipt_resets_confirmation() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;
    let bob = server.sign_in("bob", "Bob", &["confirm"]).await?;
    let id = submit(&server, &alice).await?;
    server
        .post(&bob, &format!("/api/expenses/{id}/confirm"))
        .send()
        .await?
        .error_for_status()?;

    upload(&server, &alice, Some(&id)).await?;
    let expense = json_with_status(
        server.get(&alice, &format!("/api/expenses/{id}")).send().await?,
        200,
    )
    .await?;
    let files = json_with_status(
        server
            .get(&alice, &format!("/api/expenses/{id}/files"))
            .send()
            .await?,
        200,
    )
    .await?;

    assert!(expense["confirmed_by"].is_null());
    assert_eq!(files.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strangers_may_not_attach_receipts() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;
    let mallory = server.sign_in("mallory", "Mallory", &[]).await?;
    let id = submit(&server, &alice).await?;

    let part = Part::bytes(RECEIPT.to_vec()).file_name("kvitto.pdf");
    let response = server
        .post(&mallory, &format!("/api/files?expense={id}"))
        .multipart(Form::new().part("file", part))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 403);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removed_receipt_is_detached() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;
    let id = submit(&server, &alice).await?;
    let uploaded = upload(&server, &alice, Some(&id)).await?;
    let receipt = field(&uploaded[0], "id")?.to_owned();

    let detached = json_with_status(
        server
            .post(&alice, &format!("/api/files/{receipt}/delete"))
            .send()
            .await?,
        200,
    )
    .await?;
    let files = json_with_status(
        server
            .get(&alice, &format!("/api/expenses/{id}/files"))
            .send()
            .await?,
        200,
    )
    .await?;

    assert!(detached["expense"].is_null());
    assert_eq!(files.as_array().map(Vec::len), Some(0));
    Ok(())
}
