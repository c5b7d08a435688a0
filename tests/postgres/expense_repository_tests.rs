//! Expense, payment, comment, and receipt persistence against `PostgreSQL`.

use super::helpers::{TestDatabase, expense};
use cashflow::expense::domain::{Comment, Expense, Payment, Receipt, StoredBlob};
use cashflow::expense::ports::{
    CommentRepository, ExpenseRepository, ExpenseRepositoryError, PaymentRepository,
    ReceiptRepository,
};
use cashflow::profile::domain::BankAccount;
use cashflow::profile::ports::BankAccountRepository;
use eyre::OptionExt;
use mockable::DefaultClock;
use rstest::rstest;

fn blob(key: &str) -> StoredBlob {
    StoredBlob {
        key: key.to_owned(),
        url: format!("/receipts/{key}"),
        sha256: "0".repeat(64),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_expense_round_trips_its_parts() -> eyre::Result<()> {
    let Some(db) = TestDatabase::create().await? else {
        return Ok(());
    };
    let alice = db.member("alice").await?;
    let claim = expense(&alice, &["Sexmästeriet", "cafe", "Drek"])?;

    ExpenseRepository::store(&db.expenses, &claim).await?;
    let found = ExpenseRepository::find_by_id(&db.expenses, claim.id())
        .await?
        .ok_or_eyre("stored expense is missing")?;

    let ids = |expense: &Expense| {
        expense
            .parts()
            .iter()
            .map(|part| (part.id(), part.budget_line().clone(), part.amount()))
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&found), ids(&claim));
    assert_eq!(found.owner(), alice.username());
    assert_eq!(found.total_amount(), claim.total_amount());
    assert!(!found.is_confirmed());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_expenses_are_rejected() -> eyre::Result<()> {
    let Some(db) = TestDatabase::create().await? else {
        return Ok(());
    };
    let alice = db.member("alice").await?;
    let claim = expense(&alice, &["cafe"])?;
    ExpenseRepository::store(&db.expenses, &claim).await?;

    let again = ExpenseRepository::store(&db.expenses, &claim).await;

    assert!(matches!(
        again,
        Err(ExpenseRepositoryError::DuplicateExpense(id)) if id == claim.id()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_persist_attestation_and_confirmation() -> eyre::Result<()> {
    let Some(db) = TestDatabase::create().await? else {
        return Ok(());
    };
    let alice = db.member("alice").await?;
    let bob = db.member("bob").await?;
    let tess = db.member("tess").await?;
    let mut claim = expense(&alice, &["cafe", "drek"])?;
    ExpenseRepository::store(&db.expenses, &claim).await?;
    let first = claim.parts().first().ok_or_eyre("no parts")?.id();
    let second = claim.parts().get(1).ok_or_eyre("one part only")?.id();

    claim.attest_part(first, bob.username().clone(), &DefaultClock)?;
    claim.confirm(tess.username().clone(), &DefaultClock)?;
    ExpenseRepository::update(&db.expenses, &claim).await?;
    let found = db
        .expenses
        .find_by_part(second)
        .await?
        .ok_or_eyre("expense for part is missing")?;

    assert_eq!(found.id(), claim.id());
    assert_eq!(found.confirmed_by(), Some(tess.username()));
    let attested: Vec<_> = found
        .parts()
        .iter()
        .map(|part| part.attested_by().cloned())
        .collect();
    assert_eq!(attested, vec![Some(bob.username().clone()), None]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updating_a_missing_expense_fails() -> eyre::Result<()> {
    let Some(db) = TestDatabase::create().await? else {
        return Ok(());
    };
    let alice = db.member("alice").await?;
    let claim = expense(&alice, &["cafe"])?;

    let result = ExpenseRepository::update(&db.expenses, &claim).await;

    assert!(matches!(
        result,
        Err(ExpenseRepositoryError::ExpenseNotFound(id)) if id == claim.id()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn payments_link_reimbursed_expenses() -> eyre::Result<()> {
    let Some(db) = TestDatabase::create().await? else {
        return Ok(());
    };
    let alice = db.member("alice").await?;
    let tess = db.member("tess").await?;
    let account = BankAccount::new("Huvudkonto")?;
    BankAccountRepository::store(&db.profiles, &account).await?;
    let mut paid = expense(&alice, &["cafe"])?;
    let pending = expense(&alice, &["drek"])?;
    for claim in [&paid, &pending] {
        ExpenseRepository::store(&db.expenses, claim).await?;
    }
    let part = paid.parts().first().ok_or_eyre("no parts")?.id();
    paid.attest_part(part, tess.username().clone(), &DefaultClock)?;
    paid.confirm(tess.username().clone(), &DefaultClock)?;
    let payment = Payment::new(
        tess.username().clone(),
        alice.username().clone(),
        account.id(),
        &DefaultClock,
    );
    paid.mark_paid(payment.id(), &DefaultClock)?;

    PaymentRepository::store(&db.expenses, &payment).await?;
    ExpenseRepository::update(&db.expenses, &paid).await?;

    let reimbursed = db.expenses.list_by_reimbursement(payment.id()).await?;
    let unpaid = db.expenses.list_unreimbursed().await?;
    let received = db.expenses.list_by_receiver(alice.username()).await?;
    assert_eq!(reimbursed.iter().map(Expense::id).collect::<Vec<_>>(), vec![paid.id()]);
    assert_eq!(unpaid.iter().map(Expense::id).collect::<Vec<_>>(), vec![pending.id()]);
    assert_eq!(received.iter().map(Payment::id).collect::<Vec<_>>(), vec![payment.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_expense_drops_comments_and_detaches_receipts() -> eyre::Result<()> {
    let Some(db) = TestDatabase::create().await? else {
        return Ok(());
    };
    let alice = db.member("alice").await?;
    let claim = expense(&alice, &["cafe", "drek"])?;
    ExpenseRepository::store(&db.expenses, &claim).await?;
    let comment = Comment::new(claim.id(), alice.username().clone(), "Hej", &DefaultClock)?;
    CommentRepository::store(&db.expenses, &comment).await?;
    let receipt = Receipt::new(
        Some(claim.id()),
        "kvitto.jpg",
        "image/jpeg",
        blob("abc.jpg"),
        &DefaultClock,
    )?;
    ReceiptRepository::store(&db.expenses, &receipt).await?;

    ExpenseRepository::delete(&db.expenses, claim.id()).await?;

    let condition = format!("expense_id = '{}'", claim.id());
    assert_eq!(db.count("expense_parts", &condition).await?, 0);
    assert!(CommentRepository::list_by_expense(&db.expenses, claim.id()).await?.is_empty());
    let kept = ReceiptRepository::find_by_id(&db.expenses, receipt.id())
        .await?
        .ok_or_eyre("receipt row was deleted")?;
    assert_eq!(kept.expense(), None);
    assert_eq!(kept.blob(), receipt.blob());
    let gone = ExpenseRepository::find_by_id(&db.expenses, claim.id()).await?;
    assert!(gone.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detached_receipts_leave_the_expense_listing() -> eyre::Result<()> {
    let Some(db) = TestDatabase::create().await? else {
        return Ok(());
    };
    let alice = db.member("alice").await?;
    let claim = expense(&alice, &["cafe"])?;
    ExpenseRepository::store(&db.expenses, &claim).await?;
    let mut receipt = Receipt::new(
        Some(claim.id()),
        "kvitto.pdf",
        "application/pdf",
        blob("def.pdf"),
        &DefaultClock,
    )?;
    ReceiptRepository::store(&db.expenses, &receipt).await?;
    let listed = ReceiptRepository::list_by_expense(&db.expenses, claim.id()).await?;

    receipt.detach();
    ReceiptRepository::update(&db.expenses, &receipt).await?;

    assert_eq!(listed.len(), 1);
    assert!(ReceiptRepository::list_by_expense(&db.expenses, claim.id()).await?.is_empty());
    Ok(())
}
