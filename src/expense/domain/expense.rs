//! Expense aggregate root.

use super::{
    Amount, ExpenseDomainError, ExpenseId, ExpensePart, ExpensePartId, ExpenseStatus,
    LifecycleStage, PaymentId, Verification,
};
use crate::authz::domain::CommitteeName;
use crate::profile::domain::Username;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An expense claim: what was bought, by whom, split over budget lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    owner: Username,
    description: String,
    expense_date: NaiveDate,
    parts: Vec<ExpensePart>,
    confirmed_by: Option<Username>,
    confirmed_at: Option<DateTime<Utc>>,
    reimbursement: Option<PaymentId>,
    verification: Option<Verification>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted expense aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedExpenseData {
    /// Persisted expense identifier.
    pub id: ExpenseId,
    /// Persisted owner.
    pub owner: Username,
    /// Persisted description.
    pub description: String,
    /// Persisted purchase date.
    pub expense_date: NaiveDate,
    /// Persisted parts.
    pub parts: Vec<ExpensePart>,
    /// Persisted confirmer, if any.
    pub confirmed_by: Option<Username>,
    /// Persisted confirmation time, if any.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Persisted reimbursing payment, if any.
    pub reimbursement: Option<PaymentId>,
    /// Persisted verification, if any.
    pub verification: Option<Verification>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Creates a new, unattested expense.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::EmptyDescription`] or
    /// [`ExpenseDomainError::NoParts`] when the claim is incomplete.
    pub fn new(
        owner: Username,
        description: impl Into<String>,
        expense_date: NaiveDate,
        parts: Vec<ExpensePart>,
        clock: &impl Clock,
    ) -> Result<Self, ExpenseDomainError> {
        let raw = description.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ExpenseDomainError::EmptyDescription);
        }
        if parts.is_empty() {
            return Err(ExpenseDomainError::NoParts);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: ExpenseId::new(),
            owner,
            description: trimmed.to_owned(),
            expense_date,
            parts,
            confirmed_by: None,
            confirmed_at: None,
            reimbursement: None,
            verification: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an expense from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedExpenseData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            description: data.description,
            expense_date: data.expense_date,
            parts: data.parts,
            confirmed_by: data.confirmed_by,
            confirmed_at: data.confirmed_at,
            reimbursement: data.reimbursement,
            verification: data.verification,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the expense identifier.
    #[must_use]
    pub const fn id(&self) -> ExpenseId {
        self.id
    }

    /// Returns the member who paid and claims reimbursement.
    #[must_use]
    pub const fn owner(&self) -> &Username {
        &self.owner
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the purchase date.
    #[must_use]
    pub const fn expense_date(&self) -> NaiveDate {
        self.expense_date
    }

    /// Returns the parts in submission order.
    #[must_use]
    pub fn parts(&self) -> &[ExpensePart] {
        &self.parts
    }

    /// Returns a part by identifier.
    #[must_use]
    pub fn part(&self, part_id: ExpensePartId) -> Option<&ExpensePart> {
        self.parts.iter().find(|part| part.id() == part_id)
    }

    /// Returns the confirmer, if confirmed.
    #[must_use]
    pub const fn confirmed_by(&self) -> Option<&Username> {
        self.confirmed_by.as_ref()
    }

    /// Returns the confirmation time, if confirmed.
    #[must_use]
    pub const fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }

    /// Returns the reimbursing payment, if paid.
    #[must_use]
    pub const fn reimbursement(&self) -> Option<PaymentId> {
        self.reimbursement
    }

    /// Returns the ledger verification, if booked.
    #[must_use]
    pub const fn verification(&self) -> Option<&Verification> {
        self.verification.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when every part is attested.
    #[must_use]
    pub fn is_attested(&self) -> bool {
        self.parts.iter().all(ExpensePart::is_attested)
    }

    /// Returns `true` once the receipt is confirmed to be in the binder.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.confirmed_by.is_some()
    }

    /// Returns `true` once reimbursed.
    #[must_use]
    pub const fn is_reimbursed(&self) -> bool {
        self.reimbursement.is_some()
    }

    /// Returns `true` once booked.
    #[must_use]
    pub const fn is_booked(&self) -> bool {
        self.verification.is_some()
    }

    /// Returns `true` when the expense may be included in a payment.
    #[must_use]
    pub fn is_payable(&self) -> bool {
        !self.is_reimbursed() && self.is_confirmed() && self.is_attested()
    }

    /// Returns the derived status.
    #[must_use]
    pub fn status(&self) -> ExpenseStatus {
        if let Some(verification) = &self.verification {
            return ExpenseStatus::Booked(verification.clone());
        }
        if self.is_reimbursed() {
            return ExpenseStatus::Paid;
        }
        match (self.is_attested(), self.is_confirmed()) {
            (true, true) => ExpenseStatus::AwaitingPayment,
            (true, false) => ExpenseStatus::AttestedNotConfirmed,
            (false, true) => ExpenseStatus::ConfirmedNotAttested,
            (false, false) => ExpenseStatus::NotAttested,
        }
    }

    /// Returns the coarse lifecycle stage.
    #[must_use]
    pub fn stage(&self) -> LifecycleStage {
        self.status().stage()
    }

    /// Returns the sum of all part amounts.
    #[must_use]
    pub fn total_amount(&self) -> Amount {
        self.parts.iter().map(ExpensePart::amount).sum()
    }

    /// Returns the distinct committee display names, sorted.
    #[must_use]
    pub fn committees(&self) -> Vec<String> {
        self.parts
            .iter()
            .map(|part| part.budget_line().committee_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns the distinct normalised committee keys.
    #[must_use]
    pub fn committee_keys(&self) -> BTreeSet<CommitteeName> {
        self.parts.iter().filter_map(ExpensePart::committee).collect()
    }

    /// Returns the human-readable label of a part, e.g.
    /// `"Taxi (Resor: 120.00 kr)"`.
    #[must_use]
    pub fn part_label(&self, part: &ExpensePart) -> String {
        format!(
            "{} ({}: {} kr)",
            self.description,
            part.budget_line().budget_line_name,
            part.amount()
        )
    }

    /// Attests one part.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::UnknownPart`] when the part is not on
    /// this expense and [`ExpenseDomainError::PartAlreadyAttested`] when it
    /// has already been attested.
    pub fn attest_part(
        &mut self,
        part_id: ExpensePartId,
        attester: Username,
        clock: &impl Clock,
    ) -> Result<(), ExpenseDomainError> {
        let expense = self.id;
        let part = self
            .parts
            .iter_mut()
            .find(|part| part.id() == part_id)
            .ok_or(ExpenseDomainError::UnknownPart {
                expense,
                part: part_id,
            })?;
        part.attest(attester, clock)?;
        self.touch(clock);
        Ok(())
    }

    /// Confirms that the physical receipt is filed.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::AlreadyConfirmed`] when already
    /// confirmed and [`ExpenseDomainError::AlreadyReimbursed`] after payment.
    pub fn confirm(&mut self, by: Username, clock: &impl Clock) -> Result<(), ExpenseDomainError> {
        self.ensure_not_reimbursed()?;
        if self.is_confirmed() {
            return Err(ExpenseDomainError::AlreadyConfirmed(self.id));
        }
        let timestamp = clock.utc();
        self.confirmed_by = Some(by);
        self.confirmed_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Clears the confirmation after the receipt set changed.
    ///
    /// Returns `true` when a confirmation was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::AlreadyReimbursed`] once the expense has
    /// been paid; its receipt set is frozen from then on.
    pub fn clear_confirmation(&mut self, clock: &impl Clock) -> Result<bool, ExpenseDomainError> {
        self.ensure_not_reimbursed()?;
        if !self.is_confirmed() {
            return Ok(false);
        }
        self.confirmed_by = None;
        self.confirmed_at = None;
        self.touch(clock);
        Ok(true)
    }

    /// Records the payment that reimbursed this expense.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::AlreadyReimbursed`] when already paid
    /// and [`ExpenseDomainError::NotPayable`] when not attested and
    /// confirmed.
    pub fn mark_paid(
        &mut self,
        payment: PaymentId,
        clock: &impl Clock,
    ) -> Result<(), ExpenseDomainError> {
        self.ensure_not_reimbursed()?;
        if !self.is_payable() {
            return Err(ExpenseDomainError::NotPayable(self.id));
        }
        self.reimbursement = Some(payment);
        self.touch(clock);
        Ok(())
    }

    /// Records the ledger verification.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::NotReimbursed`] before payment and
    /// [`ExpenseDomainError::AlreadyBooked`] when already booked.
    pub fn book(
        &mut self,
        verification: Verification,
        clock: &impl Clock,
    ) -> Result<(), ExpenseDomainError> {
        if self.is_booked() {
            return Err(ExpenseDomainError::AlreadyBooked(self.id));
        }
        if !self.is_reimbursed() {
            return Err(ExpenseDomainError::NotReimbursed(self.id));
        }
        self.verification = Some(verification);
        self.touch(clock);
        Ok(())
    }

    fn ensure_not_reimbursed(&self) -> Result<(), ExpenseDomainError> {
        match self.reimbursement {
            Some(payment) => Err(ExpenseDomainError::AlreadyReimbursed {
                expense: self.id,
                payment,
            }),
            None => Ok(()),
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
