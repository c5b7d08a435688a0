//! Expense parts: the per-budget-line items that are attested individually.

use super::{Amount, BudgetLine, ExpenseDomainError, ExpensePartId};
use crate::authz::domain::CommitteeName;
use crate::profile::domain::Username;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One line item of an expense, charged to a single budget line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensePart {
    id: ExpensePartId,
    budget_line: BudgetLine,
    amount: Amount,
    attested_by: Option<Username>,
    attested_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedExpensePartData {
    /// Persisted part identifier.
    pub id: ExpensePartId,
    /// Persisted budget line.
    pub budget_line: BudgetLine,
    /// Persisted amount.
    pub amount: Amount,
    /// Persisted attester, if any.
    pub attested_by: Option<Username>,
    /// Persisted attestation time, if any.
    pub attested_at: Option<DateTime<Utc>>,
}

impl ExpensePart {
    /// Creates an unattested part.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::ZeroAmount`] when the amount is zero.
    pub fn new(budget_line: BudgetLine, amount: Amount) -> Result<Self, ExpenseDomainError> {
        if amount.is_zero() {
            return Err(ExpenseDomainError::ZeroAmount);
        }
        Ok(Self {
            id: ExpensePartId::new(),
            budget_line,
            amount,
            attested_by: None,
            attested_at: None,
        })
    }

    /// Reconstructs a part from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedExpensePartData) -> Self {
        Self {
            id: data.id,
            budget_line: data.budget_line,
            amount: data.amount,
            attested_by: data.attested_by,
            attested_at: data.attested_at,
        }
    }

    /// Returns the part identifier.
    #[must_use]
    pub const fn id(&self) -> ExpensePartId {
        self.id
    }

    /// Returns the budget line.
    #[must_use]
    pub const fn budget_line(&self) -> &BudgetLine {
        &self.budget_line
    }

    /// Returns the normalised committee key.
    #[must_use]
    pub fn committee(&self) -> Option<CommitteeName> {
        self.budget_line.committee()
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Returns the attester, if attested.
    #[must_use]
    pub const fn attested_by(&self) -> Option<&Username> {
        self.attested_by.as_ref()
    }

    /// Returns the attestation time, if attested.
    #[must_use]
    pub const fn attested_at(&self) -> Option<DateTime<Utc>> {
        self.attested_at
    }

    /// Returns `true` once the part has been attested.
    #[must_use]
    pub const fn is_attested(&self) -> bool {
        self.attested_by.is_some()
    }

    pub(super) fn attest(
        &mut self,
        attester: Username,
        clock: &impl Clock,
    ) -> Result<(), ExpenseDomainError> {
        if self.is_attested() {
            return Err(ExpenseDomainError::PartAlreadyAttested(self.id));
        }
        self.attested_by = Some(attester);
        self.attested_at = Some(clock.utc());
        Ok(())
    }
}
