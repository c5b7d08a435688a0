//! The full reimbursement flow driven through HTTP.

use super::harness::{Member, TestServer, expense_body, field, json_with_status};
use rstest::rstest;
use serde_json::{Value, json};

async fn submit(server: &TestServer, owner: &Member, committee: &str) -> eyre::Result<Value> {
    let response = server
        .post(owner, "/api/expenses")
        .json(&expense_body("Fika till mötet", committee, "150.50"))
        .send()
        .await?;
    json_with_status(response, 201).await
}

fn first_part_id(expense: &Value) -> eyre::Result<String> {
    expense["expense_parts"]
        .as_array()
        .and_then(|parts| parts.first())
        .and_then(|part| part["id"].as_str())
        .map(str::to_owned)
        .ok_or_else(|| eyre::eyre!("expense without parts: {expense}"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitted_expense_is_listed_for_its_owner() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;

    let created = submit(&server, &alice, "Drek").await?;
    let listed = json_with_status(server.get(&alice, "/api/expenses").send().await?, 200).await?;

    assert_eq!(field(&created, "amount")?, "150.50");
    assert_eq!(field(&created, "stage")?, "unattested");
    assert_eq!(field(&created, "owner_username")?, "alice");
    let ids: Vec<&str> = listed
        .as_array()
        .map(|items| items.iter().filter_map(|item| item["id"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![field(&created, "id")?]);
    Ok(())
}

#[rstest]
#[case(json!({"description": "", "expense_date": "2024-03-14", "parts": []}))]
#[case(json!({"description": "Fika", "expense_date": "2024-03-14", "parts": []}))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_expense_is_a_bad_request(#[case] body: Value) -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;

    let response = server.post(&alice, "/api/expenses").json(&body).send().await?;

    let error = json_with_status(response, 400).await?;
    assert!(error["message"].is_string());
    Ok(())
}

#[rstest]
#[case(&[])]
#[case(&["*"])]
#[case(&["accounting-*"])]
#[tokio::test(flavor = "multi_thread")]
async fn strangers_may_not_view_an_expense(#[case] roles: &[&str]) -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;
    let bob = server.sign_in("bob", "Bob", roles).await?;
    let created = submit(&server, &alice, "Drek").await?;

    let path = format!("/api/expenses/{}", field(&created, "id")?);
    let response = server.get(&bob, &path).send().await?;
    let profile = server.get(&bob, "/api/users/alice").send().await?;

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(profile.status().as_u16(), 403);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attester_sees_queue_and_attests() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;
    let bob = server.sign_in("bob", "Bob", &["attest-drek"]).await?;
    let created = submit(&server, &alice, "Drek").await?;
    submit(&server, &alice, "Mottagningen").await?;

    let queue =
        json_with_status(server.get(&bob, "/api/queues/attest").send().await?, 200).await?;
    assert_eq!(queue.as_array().map(Vec::len), Some(1));

    let part = first_part_id(&created)?;
    let attested = json_with_status(
        server
            .post(&bob, &format!("/api/parts/{part}/attest"))
            .send()
            .await?,
        200,
    )
    .await?;

    assert_eq!(field(&attested, "stage")?, "attested");
    assert_eq!(
        attested["expense_parts"][0]["attested_by_username"].as_str(),
        Some("bob")
    );
    let notified: Vec<String> = server
        .notifier
        .sent()
        .into_iter()
        .map(|notification| notification.to)
        .collect();
    assert_eq!(notified, vec!["alice@example.org".to_owned()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_may_not_attest_own_part() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &["attest-drek"]).await?;
    let created = submit(&server, &alice, "Drek").await?;

    let part = first_part_id(&created)?;
    let response = server
        .post(&alice, &format!("/api/parts/{part}/attest"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 403);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expense_is_paid_and_booked() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;
    let bob = server.sign_in("bob", "Bob", &["attest-drek", "confirm"]).await?;
    let treasurer = server.sign_in("tess", "Tess", &["pay"]).await?;
    let accountant = server.sign_in("axel", "Axel", &["accounting-drek"]).await?;

    let created = submit(&server, &alice, "Drek").await?;
    let id = field(&created, "id")?.to_owned();
    let part = first_part_id(&created)?;
    server
        .post(&bob, &format!("/api/parts/{part}/attest"))
        .send()
        .await?
        .error_for_status()?;
    let confirmed = json_with_status(
        server
            .post(&bob, &format!("/api/expenses/{id}/confirm"))
            .send()
            .await?,
        200,
    )
    .await?;
    assert_eq!(field(&confirmed, "stage")?, "confirmed");

    let groups =
        json_with_status(server.get(&treasurer, "/api/queues/pay").send().await?, 200).await?;
    assert_eq!(groups[0]["user"]["username"].as_str(), Some("alice"));
    assert_eq!(groups[0]["total"].as_str(), Some("150.50"));

    let account = json_with_status(
        server
            .post(&treasurer, "/api/accounts")
            .json(&json!({"name": "Huvudkonto"}))
            .send()
            .await?,
        201,
    )
    .await?;
    let payment = json_with_status(
        server
            .post(&treasurer, "/api/payments")
            .json(&json!({
                "receiver": "alice",
                "account": field(&account, "id")?,
                "expenses": [id],
            }))
            .send()
            .await?,
        201,
    )
    .await?;
    assert_eq!(field(&payment, "amount")?, "150.50");
    assert!(field(&payment, "tag")?.starts_with("Data"));

    let to_book = json_with_status(
        server.get(&accountant, "/api/queues/account").send().await?,
        200,
    )
    .await?;
    assert_eq!(to_book.as_array().map(Vec::len), Some(1));

    let booked = json_with_status(
        server
            .post(&accountant, &format!("/api/expenses/{id}/book"))
            .json(&json!({"verification": "E123"}))
            .send()
            .await?,
        200,
    )
    .await?;
    assert_eq!(field(&booked, "stage")?, "booked");
    assert_eq!(field(&booked, "verification")?, "E123");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirm_only_treasurer_sees_confirmed_expense() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;
    let carl = server.sign_in("carl", "Carl", &["confirm"]).await?;
    let created = submit(&server, &alice, "Drek").await?;
    let id = field(&created, "id")?.to_owned();

    let queue =
        json_with_status(server.get(&carl, "/api/queues/confirm").send().await?, 200).await?;
    let confirmed = json_with_status(
        server
            .post(&carl, &format!("/api/expenses/{id}/confirm"))
            .send()
            .await?,
        200,
    )
    .await?;
    let again = server
        .post(&carl, &format!("/api/expenses/{id}/confirm"))
        .send()
        .await?;

    assert_eq!(queue.as_array().map(Vec::len), Some(1));
    assert_eq!(field(&confirmed, "confirmed_by")?, "carl");
    assert_eq!(field(&confirmed, "status")?, "Inte attesterad men i pärmen");
    assert_eq!(again.status().as_u16(), 409);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_may_not_create_bank_accounts() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;

    let response = server
        .post(&alice, "/api/accounts")
        .json(&json!({"name": "Privat"}))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 403);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_are_listed_with_authors() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;
    let created = submit(&server, &alice, "Drek").await?;
    let path = format!("/api/expenses/{}/comments", field(&created, "id")?);

    json_with_status(
        server
            .post(&alice, &path)
            .json(&json!({"content": "Kvittot kommer imorgon"}))
            .send()
            .await?,
        201,
    )
    .await?;
    let comments = json_with_status(server.get(&alice, &path).send().await?, 200).await?;

    assert_eq!(comments[0]["author_first_name"].as_str(), Some("Alice"));
    assert_eq!(comments[0]["content"].as_str(), Some("Kvittot kommer imorgon"));
    assert!(server.notifier.sent().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_deletes_unpaid_expense() -> eyre::Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.sign_in("alice", "Alice", &[]).await?;
    let created = submit(&server, &alice, "Drek").await?;
    let path = format!("/api/expenses/{}", field(&created, "id")?);

    let deleted = server
        .client
        .delete(server.url(&path))
        .bearer_auth(&alice.token)
        .send()
        .await?;
    let missing = server.get(&alice, &path).send().await?;

    assert_eq!(deleted.status().as_u16(), 204);
    assert_eq!(missing.status().as_u16(), 404);
    Ok(())
}
