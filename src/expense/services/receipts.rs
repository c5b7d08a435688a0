//! Service layer for uploading and removing receipt files.

use super::{ExpenseServiceError, ExpenseServiceResult};
use crate::authz::domain::Actor;
use crate::expense::{
    domain::{Expense, ExpenseId, Receipt, ReceiptId, policy},
    ports::{ExpenseRepository, ReceiptRepository, ReceiptStore},
};
use mockable::Clock;
use std::sync::Arc;

/// One file from an upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original file name.
    pub name: String,
    /// MIME type reported by the client.
    pub content_type: String,
    /// File content.
    pub content: Vec<u8>,
}

/// Receipt orchestration service.
#[derive(Clone)]
pub struct ReceiptService<R, S, E, K>
where
    R: ReceiptRepository,
    S: ReceiptStore,
    E: ExpenseRepository,
    K: Clock + Send + Sync,
{
    receipts: Arc<R>,
    store: Arc<S>,
    expenses: Arc<E>,
    clock: Arc<K>,
}

impl<R, S, E, K> ReceiptService<R, S, E, K>
where
    R: ReceiptRepository,
    S: ReceiptStore,
    E: ExpenseRepository,
    K: Clock + Send + Sync,
{
    /// Creates a new receipt service.
    #[must_use]
    pub const fn new(receipts: Arc<R>, store: Arc<S>, expenses: Arc<E>, clock: Arc<K>) -> Self {
        Self {
            receipts,
            store,
            expenses,
            clock,
        }
    }

    async fn require_expense(&self, id: ExpenseId) -> ExpenseServiceResult<Expense> {
        self.expenses
            .find_by_id(id)
            .await?
            .ok_or(ExpenseServiceError::ExpenseNotFound(id))
    }

    async fn save_cleared(&self, expense: &Expense, cleared: bool) -> ExpenseServiceResult<()> {
        if cleared {
            self.expenses.update(expense).await?;
            tracing::info!(expense = %expense.id(), "receipts changed; confirmation cleared");
        }
        Ok(())
    }

    /// Stores the files and records them, optionally attached to an expense.
    ///
    /// Attaching receipts to an expense clears its confirmation once every
    /// receipt has been recorded.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::NoFiles`] for an empty upload,
    /// [`ExpenseServiceError::ExpenseNotFound`] for an unknown expense,
    /// [`ExpenseServiceError::Forbidden`] when the actor may not see it, and
    /// a domain conflict when the expense has already been reimbursed.
    pub async fn upload(
        &self,
        actor: &Actor,
        files: Vec<UploadedFile>,
        expense: Option<ExpenseId>,
    ) -> ExpenseServiceResult<Vec<Receipt>> {
        if files.is_empty() {
            return Err(ExpenseServiceError::NoFiles);
        }
        let mut target = match expense {
            Some(expense_id) => {
                let found = self.require_expense(expense_id).await?;
                if !policy::may_view(actor, &found) {
                    return Err(ExpenseServiceError::forbidden(
                        actor.username(),
                        "add receipts to this expense",
                    ));
                }
                Some(found)
            }
            None => None,
        };
        // Checked in memory first so nothing is written for a paid expense.
        let cleared = target
            .as_mut()
            .map_or(Ok(false), |found| found.clear_confirmation(&*self.clock))?;

        let mut uploaded = Vec::with_capacity(files.len());
        for file in files {
            let blob = self.store.put(&file.name, &file.content).await?;
            let receipt = Receipt::new(expense, file.name, file.content_type, blob, &*self.clock)?;
            self.receipts.store(&receipt).await?;
            tracing::info!(receipt = %receipt.id(), by = %actor.username(), "uploaded receipt");
            uploaded.push(receipt);
        }
        if let Some(found) = target.as_ref() {
            self.save_cleared(found, cleared).await?;
        }
        Ok(uploaded)
    }

    /// Detaches a receipt from its expense; the stored file is kept.
    ///
    /// Detaching clears the expense's confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::ReceiptNotFound`] for unknown receipts,
    /// [`ExpenseServiceError::Forbidden`] when the actor may not delete
    /// the expense it is attached to, and a domain conflict when that
    /// expense has already been reimbursed.
    pub async fn remove(&self, actor: &Actor, id: ReceiptId) -> ExpenseServiceResult<Receipt> {
        let mut receipt = self
            .receipts
            .find_by_id(id)
            .await?
            .ok_or(ExpenseServiceError::ReceiptNotFound(id))?;
        let Some(expense_id) = receipt.expense() else {
            return Ok(receipt);
        };
        let mut expense = self.require_expense(expense_id).await?;
        if !policy::may_delete(actor, &expense) {
            return Err(ExpenseServiceError::forbidden(
                actor.username(),
                "remove receipts from this expense",
            ));
        }
        let cleared = expense.clear_confirmation(&*self.clock)?;

        receipt.detach();
        self.receipts.update(&receipt).await?;
        self.save_cleared(&expense, cleared).await?;
        tracing::info!(receipt = %id, expense = %expense_id, "detached receipt");
        Ok(receipt)
    }

    /// Lists the receipts attached to an expense the actor may see.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] when the actor may not view
    /// the expense.
    pub async fn list_for_expense(
        &self,
        actor: &Actor,
        expense: ExpenseId,
    ) -> ExpenseServiceResult<Vec<Receipt>> {
        let target = self.require_expense(expense).await?;
        if !policy::may_view(actor, &target) {
            return Err(ExpenseServiceError::forbidden(actor.username(), "view this expense"));
        }
        Ok(self.receipts.list_by_expense(expense).await?)
    }

    /// Reads stored receipt content by key.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Store`] for unknown or invalid keys.
    pub async fn content(&self, key: &str) -> ExpenseServiceResult<Vec<u8>> {
        Ok(self.store.get(key).await?)
    }
}
