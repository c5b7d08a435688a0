//! Assembles API projections from aggregates and the records they refer to.

use super::ExpenseServiceResult;
use crate::expense::{
    domain::{
        Expense, ExpenseView, Payment, PaymentView, ProfileDirectory,
    },
    ports::{ExpenseRepository, PaymentRepository},
};
use crate::profile::{
    domain::Username,
    ports::{BankAccountRepository, ProfileRepository},
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Loads the profiles, payments, and accounts a projection needs.
pub struct ExpenseProjector<E, Y, P, B>
where
    E: ExpenseRepository,
    Y: PaymentRepository,
    P: ProfileRepository,
    B: BankAccountRepository,
{
    expenses: Arc<E>,
    payments: Arc<Y>,
    profiles: Arc<P>,
    accounts: Arc<B>,
}

impl<E, Y, P, B> Clone for ExpenseProjector<E, Y, P, B>
where
    E: ExpenseRepository,
    Y: PaymentRepository,
    P: ProfileRepository,
    B: BankAccountRepository,
{
    fn clone(&self) -> Self {
        Self {
            expenses: Arc::clone(&self.expenses),
            payments: Arc::clone(&self.payments),
            profiles: Arc::clone(&self.profiles),
            accounts: Arc::clone(&self.accounts),
        }
    }
}

impl<E, Y, P, B> ExpenseProjector<E, Y, P, B>
where
    E: ExpenseRepository,
    Y: PaymentRepository,
    P: ProfileRepository,
    B: BankAccountRepository,
{
    /// Creates a projector over the given repositories.
    #[must_use]
    pub const fn new(
        expenses: Arc<E>,
        payments: Arc<Y>,
        profiles: Arc<P>,
        accounts: Arc<B>,
    ) -> Self {
        Self {
            expenses,
            payments,
            profiles,
            accounts,
        }
    }

    /// Loads the profiles of the given users; unknown users are skipped.
    pub(crate) async fn directory(
        &self,
        usernames: impl IntoIterator<Item = Username> + Send,
    ) -> ExpenseServiceResult<ProfileDirectory> {
        let wanted: BTreeSet<Username> = usernames.into_iter().collect();
        let mut profiles = Vec::with_capacity(wanted.len());
        for username in &wanted {
            if let Some(profile) = self.profiles.find_by_username(username).await? {
                profiles.push(profile);
            }
        }
        Ok(ProfileDirectory::new(profiles))
    }

    /// Projects one payment with its amount and expanded parties.
    pub(crate) async fn payment_view(
        &self,
        payment: &Payment,
    ) -> ExpenseServiceResult<PaymentView> {
        let reimbursed = self.expenses.list_by_reimbursement(payment.id()).await?;
        let amount = reimbursed.iter().map(Expense::total_amount).sum();
        let account = self.accounts.find_by_id(payment.account()).await?;
        let directory = self
            .directory([payment.payer().clone(), payment.receiver().clone()])
            .await?;
        Ok(PaymentView::new(payment, &directory, account.as_ref(), amount))
    }

    async fn reimbursement_view(
        &self,
        expense: &Expense,
    ) -> ExpenseServiceResult<Option<PaymentView>> {
        let Some(payment_id) = expense.reimbursement() else {
            return Ok(None);
        };
        match self.payments.find_by_id(payment_id).await? {
            Some(payment) => Ok(Some(self.payment_view(&payment).await?)),
            None => Ok(None),
        }
    }

    /// Projects expenses in the given order.
    pub(crate) async fn expense_views(
        &self,
        expenses: &[Expense],
    ) -> ExpenseServiceResult<Vec<ExpenseView>> {
        let directory = self.directory(people_on(expenses)).await?;
        let mut views = Vec::with_capacity(expenses.len());
        for expense in expenses {
            let reimbursement = self.reimbursement_view(expense).await?;
            views.push(ExpenseView::new(expense, &directory, reimbursement));
        }
        Ok(views)
    }

    /// Projects a single expense.
    pub(crate) async fn expense_view(
        &self,
        expense: &Expense,
    ) -> ExpenseServiceResult<ExpenseView> {
        let directory = self
            .directory(people_on(std::slice::from_ref(expense)))
            .await?;
        let reimbursement = self.reimbursement_view(expense).await?;
        Ok(ExpenseView::new(expense, &directory, reimbursement))
    }

    pub(crate) fn profiles(&self) -> &P {
        &self.profiles
    }

    pub(crate) fn payments(&self) -> &Y {
        &self.payments
    }

    pub(crate) fn accounts(&self) -> &B {
        &self.accounts
    }
}

fn people_on(expenses: &[Expense]) -> Vec<Username> {
    let mut people = Vec::new();
    for expense in expenses {
        people.push(expense.owner().clone());
        people.extend(expense.confirmed_by().cloned());
        people.extend(
            expense
                .parts()
                .iter()
                .filter_map(|part| part.attested_by().cloned()),
        );
    }
    people
}
