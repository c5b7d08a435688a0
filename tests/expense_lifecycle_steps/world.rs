//! Shared world state for expense lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use cashflow::authz::domain::{Actor, Grants};
use cashflow::expense::{
    adapters::memory::{
        InMemoryCommentRepository, InMemoryExpenseRepository, InMemoryPaymentRepository,
        RecordingCommentNotifier,
    },
    domain::{Expense, ExpenseId, PaymentId},
    services::{
        CommentService, ExpenseLifecycleService, ExpenseProjector, ExpenseServiceError,
        PaymentService,
    },
};
use cashflow::profile::{
    adapters::memory::{InMemoryBankAccountRepository, InMemoryProfileRepository},
    domain::{Profile, UserIdentity, Username},
    ports::ProfileRepository,
};
use mockable::DefaultClock;
use rstest::fixture;

type Comments = CommentService<
    InMemoryCommentRepository,
    InMemoryExpenseRepository,
    InMemoryProfileRepository,
    RecordingCommentNotifier,
    DefaultClock,
>;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycle = ExpenseLifecycleService<
    InMemoryExpenseRepository,
    InMemoryPaymentRepository,
    InMemoryProfileRepository,
    InMemoryBankAccountRepository,
    Comments,
    DefaultClock,
>;

/// Payment service type used by the BDD world.
pub type TestPayments = PaymentService<
    InMemoryExpenseRepository,
    InMemoryPaymentRepository,
    InMemoryProfileRepository,
    InMemoryBankAccountRepository,
    DefaultClock,
>;

/// Scenario world for expense lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub lifecycle: TestLifecycle,
    pub payments: TestPayments,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub accounts: Arc<InMemoryBankAccountRepository>,
    pub roles: HashMap<String, Vec<String>>,
    pub expense: Option<ExpenseId>,
    pub payment: Option<PaymentId>,
    pub last_error: Option<ExpenseServiceError>,
}

impl LifecycleWorld {
    /// Creates a world with empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let expenses = Arc::new(InMemoryExpenseRepository::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let accounts = Arc::new(InMemoryBankAccountRepository::new());
        let clock = Arc::new(DefaultClock);
        let projector = ExpenseProjector::new(
            Arc::clone(&expenses),
            Arc::new(InMemoryPaymentRepository::new()),
            Arc::clone(&profiles),
            Arc::clone(&accounts),
        );
        let comments = Arc::new(CommentService::new(
            Arc::new(InMemoryCommentRepository::new()),
            Arc::clone(&expenses),
            Arc::clone(&profiles),
            Arc::new(RecordingCommentNotifier::new()),
            Arc::clone(&clock),
        ));

        Self {
            lifecycle: ExpenseLifecycleService::new(
                Arc::clone(&expenses),
                projector.clone(),
                comments,
                Arc::clone(&clock),
            ),
            payments: PaymentService::new(expenses, projector, clock),
            profiles,
            accounts,
            roles: HashMap::new(),
            expense: None,
            payment: None,
            last_error: None,
        }
    }

    /// Builds the actor for a member from the roles granted in the scenario.
    pub fn actor(&self, raw: &str) -> Result<Actor, eyre::Report> {
        let username = Username::new(raw)?;
        let roles = self.roles.get(raw).cloned().unwrap_or_default();
        Ok(Actor::new(username, Grants::from_roles(roles)))
    }

    /// Stores a profile for the member unless one exists.
    pub async fn ensure_member(&self, raw: &str) -> Result<(), eyre::Report> {
        let username = Username::new(raw)?;
        if self.profiles.find_by_username(&username).await?.is_some() {
            return Ok(());
        }
        let identity = UserIdentity::new(username, raw, "Medlem", format!("{raw}@example.org"));
        self.profiles
            .store(&Profile::new(identity, &DefaultClock))
            .await?;
        Ok(())
    }

    /// Returns the scenario's expense, reloaded.
    pub async fn current_expense(&self) -> Result<Expense, eyre::Report> {
        let id = self
            .expense
            .ok_or_else(|| eyre::eyre!("missing expense in scenario world"))?;
        self.lifecycle
            .find(id)
            .await?
            .ok_or_else(|| eyre::eyre!("expense {id} disappeared"))
    }

    /// Records the outcome of an operation whose failure a later step checks.
    pub fn record<T>(&mut self, result: Result<T, ExpenseServiceError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Some(value)
            }
            Err(err) => {
                self.last_error = Some(err);
                None
            }
        }
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
