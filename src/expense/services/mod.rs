//! Service layer for expense orchestration.

mod comments;
mod error;
mod lifecycle;
mod payments;
mod projection;
mod receipts;

pub use comments::CommentService;
pub use error::{ExpenseServiceError, ExpenseServiceResult};
pub use lifecycle::{ExpenseLifecycleService, SubmitExpenseRequest};
pub use payments::{PayRequest, PayableGroup, PaymentService};
pub use projection::ExpenseProjector;
pub use receipts::{ReceiptService, UploadedFile};
