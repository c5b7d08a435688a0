//! Service layer for submitting expenses and moving them through their
//! lifecycle.

use super::{ExpenseProjector, ExpenseServiceError, ExpenseServiceResult};
use crate::authz::domain::Actor;
use crate::expense::{
    domain::{
        Amount, BudgetLine, Comment, Expense, ExpenseId, ExpensePart, ExpensePartId, ExpenseView,
        OwnerOverview, ProfileDirectory, Verification, policy,
    },
    ports::{CommentPublisher, ExpenseRepository, PaymentRepository},
};
use crate::profile::{
    domain::Username,
    ports::{BankAccountRepository, ProfileRepository},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for submitting a new expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitExpenseRequest {
    description: String,
    expense_date: NaiveDate,
    parts: Vec<(BudgetLine, Amount)>,
}

impl SubmitExpenseRequest {
    /// Creates a request without parts.
    #[must_use]
    pub fn new(description: impl Into<String>, expense_date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            expense_date,
            parts: Vec::new(),
        }
    }

    /// Adds a part charged to the budget line.
    #[must_use]
    pub fn with_part(mut self, budget_line: BudgetLine, amount: Amount) -> Self {
        self.parts.push((budget_line, amount));
        self
    }
}

/// Expense lifecycle orchestration service.
#[derive(Clone)]
pub struct ExpenseLifecycleService<E, Y, P, B, D, K>
where
    E: ExpenseRepository,
    Y: PaymentRepository,
    P: ProfileRepository,
    B: BankAccountRepository,
    D: CommentPublisher,
    K: Clock + Send + Sync,
{
    expenses: Arc<E>,
    projector: ExpenseProjector<E, Y, P, B>,
    publisher: Arc<D>,
    clock: Arc<K>,
}

impl<E, Y, P, B, D, K> ExpenseLifecycleService<E, Y, P, B, D, K>
where
    E: ExpenseRepository,
    Y: PaymentRepository,
    P: ProfileRepository,
    B: BankAccountRepository,
    D: CommentPublisher,
    K: Clock + Send + Sync,
{
    /// Creates a new expense lifecycle service.
    #[must_use]
    pub const fn new(
        expenses: Arc<E>,
        projector: ExpenseProjector<E, Y, P, B>,
        publisher: Arc<D>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            expenses,
            projector,
            publisher,
            clock,
        }
    }

    /// Submits a new expense owned by the actor.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Domain`] when the description is empty,
    /// there are no parts, or a part amount is zero.
    pub async fn submit(
        &self,
        actor: &Actor,
        request: SubmitExpenseRequest,
    ) -> ExpenseServiceResult<Expense> {
        let SubmitExpenseRequest {
            description,
            expense_date,
            parts,
        } = request;
        let built_parts = parts
            .into_iter()
            .map(|(budget_line, amount)| ExpensePart::new(budget_line, amount))
            .collect::<Result<Vec<_>, _>>()?;
        let expense = Expense::new(
            actor.username().clone(),
            description,
            expense_date,
            built_parts,
            &*self.clock,
        )?;
        self.expenses.store(&expense).await?;
        tracing::info!(
            expense = %expense.id(),
            owner = %expense.owner(),
            amount = %expense.total_amount(),
            "submitted expense"
        );
        Ok(expense)
    }

    /// Looks up an expense.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Repository`] when lookup fails.
    pub async fn find(&self, id: ExpenseId) -> ExpenseServiceResult<Option<Expense>> {
        Ok(self.expenses.find_by_id(id).await?)
    }

    async fn require(&self, id: ExpenseId) -> ExpenseServiceResult<Expense> {
        self.find(id)
            .await?
            .ok_or(ExpenseServiceError::ExpenseNotFound(id))
    }

    /// Returns the projection of an expense the actor may see.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] when the actor may not view
    /// the expense.
    pub async fn view(&self, actor: &Actor, id: ExpenseId) -> ExpenseServiceResult<ExpenseView> {
        let expense = self.require(id).await?;
        if !policy::may_view(actor, &expense) {
            return Err(ExpenseServiceError::forbidden(actor.username(), "view this expense"));
        }
        self.projector.expense_view(&expense).await
    }

    /// Projects expenses for API consumers, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError`] when a referenced record cannot be
    /// loaded.
    pub async fn project(&self, expenses: &[Expense]) -> ExpenseServiceResult<Vec<ExpenseView>> {
        self.projector.expense_views(expenses).await
    }

    /// Projects one expense the caller has just acted on.
    ///
    /// Unlike [`Self::view`] no visibility check is made, so treasurers who
    /// only confirm still see the result of their change.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError`] when a referenced record cannot be
    /// loaded.
    pub async fn project_one(&self, expense: &Expense) -> ExpenseServiceResult<ExpenseView> {
        self.projector.expense_view(expense).await
    }

    /// Lists the actor's own expenses, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Repository`] when lookup fails.
    pub async fn list_own(&self, actor: &Actor) -> ExpenseServiceResult<Vec<Expense>> {
        Ok(self.expenses.list_by_owner(actor.username()).await?)
    }

    /// Attests one part and leaves a comment saying so.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::PartNotFound`] for unknown parts,
    /// [`ExpenseServiceError::Forbidden`] when the actor owns the expense or
    /// may not attest the part's committee, and
    /// [`ExpenseServiceError::Domain`] when the part is already attested.
    pub async fn attest_part(
        &self,
        actor: &Actor,
        part_id: ExpensePartId,
    ) -> ExpenseServiceResult<Expense> {
        let mut expense = self
            .expenses
            .find_by_part(part_id)
            .await?
            .ok_or(ExpenseServiceError::PartNotFound(part_id))?;
        let part = expense
            .part(part_id)
            .ok_or(ExpenseServiceError::PartNotFound(part_id))?;
        if !policy::may_attest_part_of(actor, &expense, part) {
            return Err(ExpenseServiceError::forbidden(actor.username(), "attest this part"));
        }
        let label = expense.part_label(part);

        expense.attest_part(part_id, actor.username().clone(), &*self.clock)?;
        self.expenses.update(&expense).await?;
        tracing::info!(
            expense = %expense.id(),
            part = %part_id,
            attester = %actor.username(),
            "attested expense part"
        );

        let comment = Comment::new(
            expense.id(),
            actor.username().clone(),
            format!("Attesterar kvittodelen ```{label}```"),
            &*self.clock,
        )?;
        if let Err(error) = self.publisher.publish(&expense, &comment).await {
            tracing::warn!(expense = %expense.id(), %error, "failed to record attest comment");
        }
        Ok(expense)
    }

    /// Confirms that the expense's paper receipt is filed.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] without the `confirm` role
    /// and [`ExpenseServiceError::Domain`] when already confirmed or paid.
    pub async fn confirm(&self, actor: &Actor, id: ExpenseId) -> ExpenseServiceResult<Expense> {
        if !actor.grants().may_confirm() {
            return Err(ExpenseServiceError::forbidden(actor.username(), "confirm expenses"));
        }
        let mut expense = self.require(id).await?;
        expense.confirm(actor.username().clone(), &*self.clock)?;
        self.expenses.update(&expense).await?;
        tracing::info!(expense = %id, confirmer = %actor.username(), "confirmed expense");
        Ok(expense)
    }

    /// Records the ledger verification of a paid expense.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] when the actor may not
    /// account for any of the expense's committees and
    /// [`ExpenseServiceError::Domain`] for invalid verifications, unpaid, or
    /// already booked expenses.
    pub async fn book(
        &self,
        actor: &Actor,
        id: ExpenseId,
        verification: &str,
    ) -> ExpenseServiceResult<Expense> {
        let mut expense = self.require(id).await?;
        if !policy::may_account(actor, &expense) {
            return Err(ExpenseServiceError::forbidden(actor.username(), "book this expense"));
        }
        let parsed = Verification::new(verification)?;
        expense.book(parsed, &*self.clock)?;
        self.expenses.update(&expense).await?;
        tracing::info!(expense = %id, %verification, "booked expense");
        Ok(expense)
    }

    /// Deletes an unpaid expense.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] when the expense is paid or
    /// the actor is neither a signatory, the owner, nor an attester of one of
    /// its parts.
    pub async fn delete(&self, actor: &Actor, id: ExpenseId) -> ExpenseServiceResult<()> {
        let expense = self.require(id).await?;
        if !policy::may_delete(actor, &expense) {
            return Err(ExpenseServiceError::forbidden(actor.username(), "delete this expense"));
        }
        self.expenses.delete(id).await?;
        tracing::info!(expense = %id, by = %actor.username(), "deleted expense");
        Ok(())
    }

    /// Expenses of others with an unattested part the actor may attest.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Repository`] when lookup fails.
    pub async fn attestable(&self, actor: &Actor) -> ExpenseServiceResult<Vec<Expense>> {
        let pending = self.expenses.list_unreimbursed().await?;
        Ok(pending
            .into_iter()
            .filter(|expense| policy::awaits_attest_by(actor, expense))
            .collect())
    }

    /// Unpaid expenses whose receipt is not yet confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] without the `confirm` role.
    pub async fn confirmable(&self, actor: &Actor) -> ExpenseServiceResult<Vec<Expense>> {
        if !actor.grants().may_confirm() {
            return Err(ExpenseServiceError::forbidden(actor.username(), "confirm expenses"));
        }
        let pending = self.expenses.list_unreimbursed().await?;
        Ok(pending
            .into_iter()
            .filter(|expense| !expense.is_confirmed())
            .collect())
    }

    /// Attested and confirmed expenses awaiting payout, by owner.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] without the `pay` role.
    pub async fn payable(&self, actor: &Actor) -> ExpenseServiceResult<Vec<Expense>> {
        if !actor.grants().may_pay() {
            return Err(ExpenseServiceError::forbidden(actor.username(), "pay expenses"));
        }
        let mut payable: Vec<Expense> = self
            .expenses
            .list_unreimbursed()
            .await?
            .into_iter()
            .filter(Expense::is_payable)
            .collect();
        payable.sort_by(|a, b| a.owner().cmp(b.owner()));
        Ok(payable)
    }

    /// Paid, unbooked expenses the actor may book, by expense date.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Repository`] when lookup fails.
    pub async fn accountable(&self, actor: &Actor) -> ExpenseServiceResult<Vec<Expense>> {
        let mut accountable: Vec<Expense> = self
            .expenses
            .list_reimbursed_unbooked()
            .await?
            .into_iter()
            .filter(|expense| policy::may_account(actor, expense))
            .collect();
        accountable.sort_by_key(Expense::expense_date);
        Ok(accountable)
    }

    /// Groups a member's claims and reimbursements for their receipts page.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] unless the actor is the
    /// member or an administrator, and [`ExpenseServiceError::UnknownUser`]
    /// when the member has no profile.
    pub async fn owner_overview(
        &self,
        actor: &Actor,
        username: &Username,
    ) -> ExpenseServiceResult<OwnerOverview> {
        if !actor.may_view_profile(username) {
            return Err(ExpenseServiceError::forbidden(actor.username(), "view these receipts"));
        }
        let profile = self
            .projector
            .profiles()
            .find_by_username(username)
            .await?
            .ok_or_else(|| ExpenseServiceError::UnknownUser(username.clone()))?;

        let owned = self.expenses.list_by_owner(username).await?;
        let total: Amount = owned.iter().map(Expense::total_amount).sum();
        let (attested, non_attested): (Vec<Expense>, Vec<Expense>) = owned
            .into_iter()
            .filter(|expense| !expense.is_reimbursed())
            .partition(Expense::is_attested);

        let mut reimbursements = Vec::new();
        for payment in self.projector.payments().list_by_receiver(username).await? {
            reimbursements.push(self.projector.payment_view(&payment).await?);
        }

        Ok(OwnerOverview {
            user: ProfileDirectory::new([profile]).summary(username),
            non_attested_expenses: self.projector.expense_views(&non_attested).await?,
            attested_expenses: self.projector.expense_views(&attested).await?,
            reimbursements,
            total,
        })
    }
}
