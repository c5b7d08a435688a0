//! Shared builders for expense tests.

use std::sync::Arc;

use crate::authz::domain::{Actor, Grants};
use crate::expense::{
    adapters::memory::{
        InMemoryCommentRepository, InMemoryExpenseRepository, InMemoryPaymentRepository,
        InMemoryReceiptRepository, InMemoryReceiptStore, RecordingCommentNotifier,
    },
    domain::{Amount, BudgetLine, Expense, ExpensePart},
    services::{
        CommentService, ExpenseLifecycleService, ExpenseProjector, PaymentService, ReceiptService,
    },
};
use crate::profile::{
    adapters::memory::{InMemoryBankAccountRepository, InMemoryProfileRepository},
    domain::{BankAccount, BankAccountId, Profile, UserIdentity, Username},
    ports::{BankAccountRepository, ProfileRepository},
};
use chrono::NaiveDate;
use mockable::DefaultClock;

pub(super) type Projector = ExpenseProjector<
    InMemoryExpenseRepository,
    InMemoryPaymentRepository,
    InMemoryProfileRepository,
    InMemoryBankAccountRepository,
>;

pub(super) type Comments = CommentService<
    InMemoryCommentRepository,
    InMemoryExpenseRepository,
    InMemoryProfileRepository,
    RecordingCommentNotifier,
    DefaultClock,
>;

pub(super) type Lifecycle = ExpenseLifecycleService<
    InMemoryExpenseRepository,
    InMemoryPaymentRepository,
    InMemoryProfileRepository,
    InMemoryBankAccountRepository,
    Comments,
    DefaultClock,
>;

pub(super) type Payments = PaymentService<
    InMemoryExpenseRepository,
    InMemoryPaymentRepository,
    InMemoryProfileRepository,
    InMemoryBankAccountRepository,
    DefaultClock,
>;

pub(super) type Receipts = ReceiptService<
    InMemoryReceiptRepository,
    InMemoryReceiptStore,
    InMemoryExpenseRepository,
    DefaultClock,
>;

pub(super) fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid username")
}

pub(super) fn actor(raw: &str, roles: &[&str]) -> Actor {
    Actor::new(username(raw), Grants::from_roles(roles.iter().copied()))
}

pub(super) fn line(committee: &str) -> BudgetLine {
    BudgetLine::named(committee, "Verksamhet", "Fika")
}

pub(super) fn amount(raw: &str) -> Amount {
    Amount::parse(raw).expect("valid amount")
}

pub(super) fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).expect("valid date")
}

pub(super) fn expense(owner: &str, committees: &[&str]) -> Expense {
    let parts = committees
        .iter()
        .map(|committee| ExpensePart::new(line(committee), amount("100")).expect("valid part"))
        .collect();
    Expense::new(username(owner), "Fika till mötet", date(), parts, &DefaultClock)
        .expect("valid expense")
}

/// In-memory wiring of every expense service.
pub(super) struct Harness {
    pub expenses: Arc<InMemoryExpenseRepository>,
    pub comment_repo: Arc<InMemoryCommentRepository>,
    pub receipt_repo: Arc<InMemoryReceiptRepository>,
    pub store: Arc<InMemoryReceiptStore>,
    pub notifier: Arc<RecordingCommentNotifier>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub accounts: Arc<InMemoryBankAccountRepository>,
    pub comments: Arc<Comments>,
    pub lifecycle: Lifecycle,
    pub payments: Payments,
    pub receipts: Receipts,
}

impl Harness {
    pub(super) fn new() -> Self {
        let expenses = Arc::new(InMemoryExpenseRepository::new());
        let payment_repo = Arc::new(InMemoryPaymentRepository::new());
        let comment_repo = Arc::new(InMemoryCommentRepository::new());
        let receipt_repo = Arc::new(InMemoryReceiptRepository::new());
        let store = Arc::new(InMemoryReceiptStore::new());
        let notifier = Arc::new(RecordingCommentNotifier::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let accounts = Arc::new(InMemoryBankAccountRepository::new());
        let clock = Arc::new(DefaultClock);

        let projector: Projector = ExpenseProjector::new(
            Arc::clone(&expenses),
            payment_repo,
            Arc::clone(&profiles),
            Arc::clone(&accounts),
        );
        let comments = Arc::new(CommentService::new(
            Arc::clone(&comment_repo),
            Arc::clone(&expenses),
            Arc::clone(&profiles),
            Arc::clone(&notifier),
            Arc::clone(&clock),
        ));
        let lifecycle = ExpenseLifecycleService::new(
            Arc::clone(&expenses),
            projector.clone(),
            Arc::clone(&comments),
            Arc::clone(&clock),
        );
        let payments = PaymentService::new(Arc::clone(&expenses), projector, Arc::clone(&clock));
        let receipts = ReceiptService::new(
            Arc::clone(&receipt_repo),
            Arc::clone(&store),
            Arc::clone(&expenses),
            clock,
        );

        Self {
            expenses,
            comment_repo,
            receipt_repo,
            store,
            notifier,
            profiles,
            accounts,
            comments,
            lifecycle,
            payments,
            receipts,
        }
    }

    pub(super) async fn member(&self, raw: &str, first_name: &str) -> Profile {
        let identity = UserIdentity::new(
            username(raw),
            first_name,
            "Medlem",
            format!("{raw}@example.org"),
        );
        let profile = Profile::new(identity, &DefaultClock);
        self.profiles
            .store(&profile)
            .await
            .expect("profile should store");
        profile
    }

    pub(super) async fn account(&self, name: &str) -> BankAccountId {
        let account = BankAccount::new(name).expect("valid account");
        self.accounts
            .store(&account)
            .await
            .expect("account should store");
        account.id()
    }
}
