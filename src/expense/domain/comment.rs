//! Comments on expenses.

use super::{CommentId, ExpenseDomainError, ExpenseId};
use crate::profile::domain::Username;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A note left on an expense by a member or officer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    expense: ExpenseId,
    author: Username,
    content: String,
    posted_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Persisted expense.
    pub expense: ExpenseId,
    /// Persisted author.
    pub author: Username,
    /// Persisted text.
    pub content: String,
    /// Persisted posting time.
    pub posted_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment posted now.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::EmptyComment`] for blank content.
    pub fn new(
        expense: ExpenseId,
        author: Username,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, ExpenseDomainError> {
        let text = content.into();
        if text.trim().is_empty() {
            return Err(ExpenseDomainError::EmptyComment);
        }
        Ok(Self {
            id: CommentId::new(),
            expense,
            author,
            content: text,
            posted_at: clock.utc(),
        })
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            expense: data.expense,
            author: data.author,
            content: data.content,
            posted_at: data.posted_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the expense commented on.
    #[must_use]
    pub const fn expense(&self) -> ExpenseId {
        self.expense
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> &Username {
        &self.author
    }

    /// Returns the text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the posting time.
    #[must_use]
    pub const fn posted_at(&self) -> DateTime<Utc> {
        self.posted_at
    }
}
