//! Service-level errors shared by the expense services.

use crate::expense::{
    domain::{ExpenseDomainError, ExpenseId, ExpensePartId, PaymentId, ReceiptId},
    ports::{ExpenseRepositoryError, ReceiptStoreError},
};
use crate::profile::{
    domain::{BankAccountId, Username},
    ports::ProfileRepositoryError,
};
use thiserror::Error;

/// Errors returned by expense orchestration services.
#[derive(Debug, Error)]
pub enum ExpenseServiceError {
    /// Domain validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] ExpenseDomainError),
    /// Expense persistence failed.
    #[error(transparent)]
    Repository(#[from] ExpenseRepositoryError),
    /// Profile lookup failed.
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
    /// Receipt blob storage failed.
    #[error(transparent)]
    Store(#[from] ReceiptStoreError),
    /// The expense does not exist.
    #[error("expense not found: {0}")]
    ExpenseNotFound(ExpenseId),
    /// No expense has the part.
    #[error("expense part not found: {0}")]
    PartNotFound(ExpensePartId),
    /// The payment does not exist.
    #[error("payment not found: {0}")]
    PaymentNotFound(PaymentId),
    /// The receipt does not exist.
    #[error("receipt not found: {0}")]
    ReceiptNotFound(ReceiptId),
    /// The user has no profile.
    #[error("unknown user: {0}")]
    UnknownUser(Username),
    /// The organisation account does not exist.
    #[error("unknown bank account: {0}")]
    UnknownBankAccount(BankAccountId),
    /// A payment must reimburse the receiver's own expenses.
    #[error("expense {expense} is not owned by {receiver}")]
    ReceiverMismatch {
        /// Expense concerned.
        expense: ExpenseId,
        /// Intended receiver.
        receiver: Username,
    },
    /// A payment must cover at least one expense.
    #[error("a payment must cover at least one expense")]
    NothingToPay,
    /// An upload contained no files.
    #[error("upload at least one file")]
    NoFiles,
    /// The actor lacks the capability for the action.
    #[error("{actor} may not {action}")]
    Forbidden {
        /// Requesting user.
        actor: Username,
        /// Action attempted.
        action: &'static str,
    },
}

impl ExpenseServiceError {
    pub(super) fn forbidden(actor: &Username, action: &'static str) -> Self {
        Self::Forbidden {
            actor: actor.clone(),
            action,
        }
    }
}

/// Result type for expense service operations.
pub type ExpenseServiceResult<T> = Result<T, ExpenseServiceError>;
