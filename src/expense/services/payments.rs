//! Service layer for paying out reimbursements.

use super::{ExpenseProjector, ExpenseServiceError, ExpenseServiceResult};
use crate::authz::domain::Actor;
use crate::expense::{
    domain::{Amount, Expense, ExpenseId, ExpenseView, Payment, PaymentId, PaymentView},
    ports::{ExpenseRepository, PaymentRepository},
};
use crate::profile::{
    domain::{BankAccountId, UserSummary, Username},
    ports::{BankAccountRepository, ProfileRepository},
};
use mockable::Clock;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Request payload for paying a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayRequest {
    receiver: Username,
    account: BankAccountId,
    expenses: Vec<ExpenseId>,
}

impl PayRequest {
    /// Creates a request to reimburse `receiver` from `account`.
    ///
    /// Repeated expense IDs are dropped; the first occurrence keeps its place.
    #[must_use]
    pub fn new(
        receiver: Username,
        account: BankAccountId,
        expenses: impl IntoIterator<Item = ExpenseId>,
    ) -> Self {
        let mut seen = BTreeSet::new();
        Self {
            receiver,
            account,
            expenses: expenses.into_iter().filter(|id| seen.insert(*id)).collect(),
        }
    }

    /// The expenses to reimburse, without repeats.
    #[must_use]
    pub fn expenses(&self) -> &[ExpenseId] {
        &self.expenses
    }
}

/// Payable expenses of one member, as shown on the payout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayableGroup {
    /// The member to reimburse.
    pub user: UserSummary,
    /// Their payable expenses.
    pub expenses: Vec<ExpenseView>,
    /// Sum of the expenses.
    pub total: Amount,
}

/// Reimbursement orchestration service.
#[derive(Clone)]
pub struct PaymentService<E, Y, P, B, K>
where
    E: ExpenseRepository,
    Y: PaymentRepository,
    P: ProfileRepository,
    B: BankAccountRepository,
    K: Clock + Send + Sync,
{
    expenses: Arc<E>,
    projector: ExpenseProjector<E, Y, P, B>,
    clock: Arc<K>,
}

impl<E, Y, P, B, K> PaymentService<E, Y, P, B, K>
where
    E: ExpenseRepository,
    Y: PaymentRepository,
    P: ProfileRepository,
    B: BankAccountRepository,
    K: Clock + Send + Sync,
{
    /// Creates a new payment service.
    #[must_use]
    pub const fn new(
        expenses: Arc<E>,
        projector: ExpenseProjector<E, Y, P, B>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            expenses,
            projector,
            clock,
        }
    }

    /// Pays the receiver for the listed expenses in a single transfer.
    ///
    /// Every expense is validated before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] without the `pay` role,
    /// [`ExpenseServiceError::NothingToPay`] for an empty list,
    /// [`ExpenseServiceError::UnknownBankAccount`] or
    /// [`ExpenseServiceError::UnknownUser`] for missing references,
    /// [`ExpenseServiceError::ReceiverMismatch`] when an expense belongs to
    /// someone else, and [`ExpenseServiceError::Domain`] when an expense is
    /// not payable.
    pub async fn pay(&self, actor: &Actor, request: PayRequest) -> ExpenseServiceResult<Payment> {
        if !actor.grants().may_pay() {
            return Err(ExpenseServiceError::forbidden(actor.username(), "pay expenses"));
        }
        let PayRequest {
            receiver,
            account,
            expenses,
        } = request;
        if expenses.is_empty() {
            return Err(ExpenseServiceError::NothingToPay);
        }
        self.projector
            .accounts()
            .find_by_id(account)
            .await?
            .ok_or(ExpenseServiceError::UnknownBankAccount(account))?;
        self.projector
            .profiles()
            .find_by_username(&receiver)
            .await?
            .ok_or_else(|| ExpenseServiceError::UnknownUser(receiver.clone()))?;

        let payment = Payment::new(
            actor.username().clone(),
            receiver.clone(),
            account,
            &*self.clock,
        );
        let mut reimbursed = Vec::with_capacity(expenses.len());
        for id in expenses {
            let mut expense = self
                .expenses
                .find_by_id(id)
                .await?
                .ok_or(ExpenseServiceError::ExpenseNotFound(id))?;
            if expense.owner() != &receiver {
                return Err(ExpenseServiceError::ReceiverMismatch {
                    expense: id,
                    receiver,
                });
            }
            expense.mark_paid(payment.id(), &*self.clock)?;
            reimbursed.push(expense);
        }

        self.projector.payments().store(&payment).await?;
        for expense in &reimbursed {
            self.expenses.update(expense).await?;
        }
        let amount: Amount = reimbursed.iter().map(Expense::total_amount).sum();
        tracing::info!(
            payment = %payment.id(),
            tag = %payment.tag(),
            %receiver,
            %amount,
            expenses = reimbursed.len(),
            "paid reimbursement"
        );
        Ok(payment)
    }

    /// Groups payable expenses by owner, ordered by username.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] without the `pay` role.
    pub async fn payable_by_owner(&self, actor: &Actor) -> ExpenseServiceResult<Vec<PayableGroup>> {
        if !actor.grants().may_pay() {
            return Err(ExpenseServiceError::forbidden(actor.username(), "pay expenses"));
        }
        let mut by_owner: BTreeMap<Username, Vec<Expense>> = BTreeMap::new();
        for expense in self.expenses.list_unreimbursed().await? {
            if expense.is_payable() {
                by_owner
                    .entry(expense.owner().clone())
                    .or_default()
                    .push(expense);
            }
        }

        let directory = self.projector.directory(by_owner.keys().cloned()).await?;
        let mut groups = Vec::with_capacity(by_owner.len());
        for (owner, expenses) in by_owner {
            groups.push(PayableGroup {
                user: directory.summary(&owner),
                total: expenses.iter().map(Expense::total_amount).sum(),
                expenses: self.projector.expense_views(&expenses).await?,
            });
        }
        Ok(groups)
    }

    /// Returns a payment with its amount, tag, and expanded parties.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::PaymentNotFound`] for unknown payments
    /// and [`ExpenseServiceError::Forbidden`] unless the actor is the
    /// receiver or an administrator.
    pub async fn view(&self, actor: &Actor, id: PaymentId) -> ExpenseServiceResult<PaymentView> {
        let payment = self
            .projector
            .payments()
            .find_by_id(id)
            .await?
            .ok_or(ExpenseServiceError::PaymentNotFound(id))?;
        if !actor.may_view_profile(payment.receiver()) {
            return Err(ExpenseServiceError::forbidden(actor.username(), "view this payment"));
        }
        self.projector.payment_view(&payment).await
    }
}
