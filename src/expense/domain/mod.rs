//! Domain model for expense claims and their reimbursement lifecycle.
//!
//! An expense moves forward through attestation of each part, confirmation
//! that the paper receipt is filed, payment, and booking. The status shown
//! to members is derived from which of those steps have happened.

mod amount;
mod budget;
mod comment;
mod error;
mod expense;
mod ids;
mod part;
mod payment;
pub mod policy;
mod receipt;
mod status;
mod verification;
mod view;

pub use amount::Amount;
pub use budget::BudgetLine;
pub use comment::{Comment, PersistedCommentData};
pub use error::ExpenseDomainError;
pub use expense::{Expense, PersistedExpenseData};
pub use ids::{CommentId, ExpenseId, ExpensePartId, PaymentId, ReceiptId};
pub use part::{ExpensePart, PersistedExpensePartData};
pub use payment::{Payment, PersistedPaymentData};
pub use receipt::{PersistedReceiptData, Receipt, StoredBlob};
pub use status::{ExpenseStatus, LifecycleStage};
pub use verification::Verification;
pub use view::{
    CommentView, ExpensePartView, ExpenseView, OwnerOverview, PaymentView, ProfileDirectory,
    ReceiptView,
};
