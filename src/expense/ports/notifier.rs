//! Outbound notification port for new comments.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Everything needed to tell an expense owner about a new comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentNotification {
    /// Owner email address.
    pub to: String,
    /// Owner display name.
    pub receiver_name: String,
    /// Author display name.
    pub author_name: String,
    /// Expense identifier.
    pub expense_id: String,
    /// Expense description.
    pub expense_description: String,
    /// Comment text.
    pub content: String,
}

impl CommentNotification {
    /// Returns the mail subject line.
    #[must_use]
    pub fn subject(&self) -> String {
        format!(
            "{} har lagt till en kommentar på ditt utlägg.",
            self.author_name
        )
    }
}

/// Delivers comment notifications to expense owners.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentNotifier: Send + Sync {
    /// Sends one notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when rendering or delivery fails.
    async fn notify(&self, notification: &CommentNotification) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// The message body could not be rendered.
    #[error("failed to render notification: {0}")]
    Template(String),

    /// The mail service could not be reached or rejected the message.
    #[error("failed to deliver notification: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
