//! Port through which lifecycle operations leave comments on expenses.

use crate::expense::domain::{Comment, Expense};
use crate::expense::ports::ExpenseRepositoryResult;
use async_trait::async_trait;

/// Persists a comment and performs its side effects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentPublisher: Send + Sync {
    /// Stores the comment and notifies the expense owner when needed.
    ///
    /// # Errors
    ///
    /// Returns an error only when the comment cannot be stored; notification
    /// failures are logged.
    async fn publish(&self, expense: &Expense, comment: &Comment) -> ExpenseRepositoryResult<()>;
}
