//! Port contracts for expense persistence, storage, and notification.

pub mod notifier;
pub mod publisher;
pub mod receipt_store;
pub mod repository;

pub use notifier::{CommentNotification, CommentNotifier, NotifierError, NotifierResult};
#[cfg(test)]
pub use notifier::MockCommentNotifier;
pub use publisher::CommentPublisher;
#[cfg(test)]
pub use publisher::MockCommentPublisher;
#[cfg(test)]
pub use receipt_store::MockReceiptStore;
pub use receipt_store::{ReceiptStore, ReceiptStoreError, ReceiptStoreResult};
#[cfg(test)]
pub use repository::MockExpenseRepository;
pub use repository::{
    CommentRepository, ExpenseRepository, ExpenseRepositoryError, ExpenseRepositoryResult,
    PaymentRepository, ReceiptRepository,
};
