//! Error types for expense domain validation and lifecycle transitions.

use super::{ExpenseId, ExpensePartId, PaymentId};
use thiserror::Error;

/// Errors returned while constructing or transitioning expense values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpenseDomainError {
    /// The expense description is empty after trimming.
    #[error("expense description must not be empty")]
    EmptyDescription,

    /// An expense was submitted without parts.
    #[error("an expense needs at least one part")]
    NoParts,

    /// The amount could not be parsed as kronor with at most two decimals.
    #[error("invalid amount '{0}', expected e.g. 123.45")]
    InvalidAmount(String),

    /// A part amount was zero.
    #[error("part amount must not be zero")]
    ZeroAmount,

    /// The verification number is empty or longer than seven characters.
    #[error("invalid verification '{0}', expected 1 to 7 characters")]
    InvalidVerification(String),

    /// The part does not belong to the expense.
    #[error("part {part} does not belong to expense {expense}")]
    UnknownPart {
        /// Expense searched.
        expense: ExpenseId,
        /// Part requested.
        part: ExpensePartId,
    },

    /// The part has already been attested.
    #[error("part {0} is already attested")]
    PartAlreadyAttested(ExpensePartId),

    /// The expense has already been confirmed.
    #[error("expense {0} is already confirmed")]
    AlreadyConfirmed(ExpenseId),

    /// Payment requires every part attested and the receipt confirmed.
    #[error("expense {0} must be attested and confirmed before payment")]
    NotPayable(ExpenseId),

    /// The expense has already been reimbursed.
    #[error("expense {expense} is already reimbursed by payment {payment}")]
    AlreadyReimbursed {
        /// Expense concerned.
        expense: ExpenseId,
        /// Existing payment.
        payment: PaymentId,
    },

    /// Booking requires the expense to be reimbursed first.
    #[error("expense {0} must be paid before it is booked")]
    NotReimbursed(ExpenseId),

    /// The expense already carries a verification.
    #[error("expense {0} is already booked")]
    AlreadyBooked(ExpenseId),

    /// A comment had no content.
    #[error("comment must not be empty")]
    EmptyComment,

    /// A receipt had no file name.
    #[error("receipt file name must not be empty")]
    EmptyReceiptName,
}

impl ExpenseDomainError {
    /// Returns `true` for errors caused by the expense's current lifecycle
    /// stage rather than by malformed input.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::PartAlreadyAttested(_)
                | Self::AlreadyConfirmed(_)
                | Self::NotPayable(_)
                | Self::AlreadyReimbursed { .. }
                | Self::NotReimbursed(_)
                | Self::AlreadyBooked(_)
        )
    }
}
