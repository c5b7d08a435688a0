//! Repository ports for expenses, payments, comments, and receipts.

use crate::expense::domain::{
    Comment, CommentId, Expense, ExpenseId, ExpensePartId, Payment, PaymentId, Receipt, ReceiptId,
};
use crate::profile::domain::Username;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for expense-context repository operations.
pub type ExpenseRepositoryResult<T> = Result<T, ExpenseRepositoryError>;

/// Expense persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Stores a new expense with its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseRepositoryError::DuplicateExpense`] when the
    /// identifier already exists.
    async fn store(&self, expense: &Expense) -> ExpenseRepositoryResult<()>;

    /// Persists changes to an existing expense and its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseRepositoryError::ExpenseNotFound`] when the expense
    /// does not exist.
    async fn update(&self, expense: &Expense) -> ExpenseRepositoryResult<()>;

    /// Deletes an expense together with its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseRepositoryError::ExpenseNotFound`] when the expense
    /// does not exist.
    async fn delete(&self, id: ExpenseId) -> ExpenseRepositoryResult<()>;

    /// Finds an expense by identifier.
    async fn find_by_id(&self, id: ExpenseId) -> ExpenseRepositoryResult<Option<Expense>>;

    /// Finds the expense owning a part.
    async fn find_by_part(&self, part: ExpensePartId) -> ExpenseRepositoryResult<Option<Expense>>;

    /// Returns a member's expenses, newest first.
    async fn list_by_owner(&self, owner: &Username) -> ExpenseRepositoryResult<Vec<Expense>>;

    /// Returns every expense without a reimbursement, oldest first.
    async fn list_unreimbursed(&self) -> ExpenseRepositoryResult<Vec<Expense>>;

    /// Returns the expenses reimbursed by a payment.
    async fn list_by_reimbursement(
        &self,
        payment: PaymentId,
    ) -> ExpenseRepositoryResult<Vec<Expense>>;

    /// Returns reimbursed expenses without verification, by expense date.
    async fn list_reimbursed_unbooked(&self) -> ExpenseRepositoryResult<Vec<Expense>>;
}

/// Payment persistence contract.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Stores a new payment.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseRepositoryError::DuplicatePayment`] when the
    /// identifier already exists.
    async fn store(&self, payment: &Payment) -> ExpenseRepositoryResult<()>;

    /// Finds a payment by identifier.
    async fn find_by_id(&self, id: PaymentId) -> ExpenseRepositoryResult<Option<Payment>>;

    /// Returns the payments a member received, newest first.
    async fn list_by_receiver(&self, receiver: &Username) -> ExpenseRepositoryResult<Vec<Payment>>;
}

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseRepositoryError::DuplicateComment`] when the
    /// identifier already exists.
    async fn store(&self, comment: &Comment) -> ExpenseRepositoryResult<()>;

    /// Returns the comments on an expense, oldest first.
    async fn list_by_expense(&self, expense: ExpenseId) -> ExpenseRepositoryResult<Vec<Comment>>;
}

/// Receipt metadata persistence contract.
#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Stores a new receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseRepositoryError::DuplicateReceipt`] when the
    /// identifier already exists.
    async fn store(&self, receipt: &Receipt) -> ExpenseRepositoryResult<()>;

    /// Persists changes to an existing receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseRepositoryError::ReceiptNotFound`] when the receipt
    /// does not exist.
    async fn update(&self, receipt: &Receipt) -> ExpenseRepositoryResult<()>;

    /// Finds a receipt by identifier.
    async fn find_by_id(&self, id: ReceiptId) -> ExpenseRepositoryResult<Option<Receipt>>;

    /// Returns the receipts attached to an expense, in upload order.
    async fn list_by_expense(&self, expense: ExpenseId) -> ExpenseRepositoryResult<Vec<Receipt>>;
}

/// Errors returned by expense-context repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ExpenseRepositoryError {
    /// An expense with the same identifier already exists.
    #[error("duplicate expense identifier: {0}")]
    DuplicateExpense(ExpenseId),

    /// The expense was not found.
    #[error("expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    /// A payment with the same identifier already exists.
    #[error("duplicate payment identifier: {0}")]
    DuplicatePayment(PaymentId),

    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// A receipt with the same identifier already exists.
    #[error("duplicate receipt identifier: {0}")]
    DuplicateReceipt(ReceiptId),

    /// The receipt was not found.
    #[error("receipt not found: {0}")]
    ReceiptNotFound(ReceiptId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ExpenseRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for ExpenseRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
