//! In-memory adapters for expense tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::expense::{
    domain::{
        Comment, Expense, ExpenseId, ExpensePartId, Payment, PaymentId, Receipt, ReceiptId,
        StoredBlob,
    },
    ports::{
        CommentNotification, CommentNotifier, CommentRepository, ExpenseRepository,
        ExpenseRepositoryError, ExpenseRepositoryResult, NotifierResult, PaymentRepository,
        ReceiptRepository, ReceiptStore, ReceiptStoreError, ReceiptStoreResult,
    },
};
use crate::profile::domain::Username;

fn poisoned(err: impl ToString) -> ExpenseRepositoryError {
    ExpenseRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory expense repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExpenseRepository {
    expenses: Arc<RwLock<HashMap<ExpenseId, Expense>>>,
}

impl InMemoryExpenseRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn select(
        &self,
        predicate: impl Fn(&Expense) -> bool,
    ) -> ExpenseRepositoryResult<Vec<Expense>> {
        let expenses = self.expenses.read().map_err(poisoned)?;
        let mut selected: Vec<Expense> = expenses
            .values()
            .filter(|expense| predicate(expense))
            .cloned()
            .collect();
        selected.sort_by_key(Expense::created_at);
        Ok(selected)
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn store(&self, expense: &Expense) -> ExpenseRepositoryResult<()> {
        let mut expenses = self.expenses.write().map_err(poisoned)?;
        if expenses.contains_key(&expense.id()) {
            return Err(ExpenseRepositoryError::DuplicateExpense(expense.id()));
        }
        expenses.insert(expense.id(), expense.clone());
        Ok(())
    }

    async fn update(&self, expense: &Expense) -> ExpenseRepositoryResult<()> {
        let mut expenses = self.expenses.write().map_err(poisoned)?;
        let slot = expenses
            .get_mut(&expense.id())
            .ok_or(ExpenseRepositoryError::ExpenseNotFound(expense.id()))?;
        *slot = expense.clone();
        Ok(())
    }

    async fn delete(&self, id: ExpenseId) -> ExpenseRepositoryResult<()> {
        let mut expenses = self.expenses.write().map_err(poisoned)?;
        expenses
            .remove(&id)
            .map(|_| ())
            .ok_or(ExpenseRepositoryError::ExpenseNotFound(id))
    }

    async fn find_by_id(&self, id: ExpenseId) -> ExpenseRepositoryResult<Option<Expense>> {
        let expenses = self.expenses.read().map_err(poisoned)?;
        Ok(expenses.get(&id).cloned())
    }

    async fn find_by_part(&self, part: ExpensePartId) -> ExpenseRepositoryResult<Option<Expense>> {
        let expenses = self.expenses.read().map_err(poisoned)?;
        Ok(expenses
            .values()
            .find(|expense| expense.part(part).is_some())
            .cloned())
    }

    async fn list_by_owner(&self, owner: &Username) -> ExpenseRepositoryResult<Vec<Expense>> {
        let mut listed = self.select(|expense| expense.owner() == owner)?;
        listed.reverse();
        Ok(listed)
    }

    async fn list_unreimbursed(&self) -> ExpenseRepositoryResult<Vec<Expense>> {
        self.select(|expense| !expense.is_reimbursed())
    }

    async fn list_by_reimbursement(
        &self,
        payment: PaymentId,
    ) -> ExpenseRepositoryResult<Vec<Expense>> {
        self.select(|expense| expense.reimbursement() == Some(payment))
    }

    async fn list_reimbursed_unbooked(&self) -> ExpenseRepositoryResult<Vec<Expense>> {
        let mut listed = self.select(|expense| expense.is_reimbursed() && !expense.is_booked())?;
        listed.sort_by_key(Expense::expense_date);
        Ok(listed)
    }
}

/// Thread-safe in-memory payment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<PaymentId, Payment>>>,
}

impl InMemoryPaymentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn store(&self, payment: &Payment) -> ExpenseRepositoryResult<()> {
        let mut payments = self.payments.write().map_err(poisoned)?;
        if payments.contains_key(&payment.id()) {
            return Err(ExpenseRepositoryError::DuplicatePayment(payment.id()));
        }
        payments.insert(payment.id(), payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PaymentId) -> ExpenseRepositoryResult<Option<Payment>> {
        let payments = self.payments.read().map_err(poisoned)?;
        Ok(payments.get(&id).cloned())
    }

    async fn list_by_receiver(&self, receiver: &Username) -> ExpenseRepositoryResult<Vec<Payment>> {
        let payments = self.payments.read().map_err(poisoned)?;
        let mut listed: Vec<Payment> = payments
            .values()
            .filter(|payment| payment.receiver() == receiver)
            .cloned()
            .collect();
        listed.sort_by_key(|payment| std::cmp::Reverse(payment.paid_at()));
        Ok(listed)
    }
}

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<Vec<Comment>>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> ExpenseRepositoryResult<()> {
        let mut comments = self.comments.write().map_err(poisoned)?;
        if comments.iter().any(|existing| existing.id() == comment.id()) {
            return Err(ExpenseRepositoryError::DuplicateComment(comment.id()));
        }
        comments.push(comment.clone());
        Ok(())
    }

    async fn list_by_expense(&self, expense: ExpenseId) -> ExpenseRepositoryResult<Vec<Comment>> {
        let comments = self.comments.read().map_err(poisoned)?;
        Ok(comments
            .iter()
            .filter(|comment| comment.expense() == expense)
            .cloned()
            .collect())
    }
}

/// Thread-safe in-memory receipt metadata repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReceiptRepository {
    receipts: Arc<RwLock<Vec<Receipt>>>,
}

impl InMemoryReceiptRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReceiptRepository for InMemoryReceiptRepository {
    async fn store(&self, receipt: &Receipt) -> ExpenseRepositoryResult<()> {
        let mut receipts = self.receipts.write().map_err(poisoned)?;
        if receipts.iter().any(|existing| existing.id() == receipt.id()) {
            return Err(ExpenseRepositoryError::DuplicateReceipt(receipt.id()));
        }
        receipts.push(receipt.clone());
        Ok(())
    }

    async fn update(&self, receipt: &Receipt) -> ExpenseRepositoryResult<()> {
        let mut receipts = self.receipts.write().map_err(poisoned)?;
        let slot = receipts
            .iter_mut()
            .find(|existing| existing.id() == receipt.id())
            .ok_or(ExpenseRepositoryError::ReceiptNotFound(receipt.id()))?;
        *slot = receipt.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ReceiptId) -> ExpenseRepositoryResult<Option<Receipt>> {
        let receipts = self.receipts.read().map_err(poisoned)?;
        Ok(receipts.iter().find(|receipt| receipt.id() == id).cloned())
    }

    async fn list_by_expense(&self, expense: ExpenseId) -> ExpenseRepositoryResult<Vec<Receipt>> {
        let receipts = self.receipts.read().map_err(poisoned)?;
        Ok(receipts
            .iter()
            .filter(|receipt| receipt.expense() == Some(expense))
            .cloned()
            .collect())
    }
}

/// In-memory content-addressed receipt store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReceiptStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryReceiptStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored blobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.read().map_or(0, |blobs| blobs.len())
    }

    /// Returns `true` when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn put(&self, file_name: &str, content: &[u8]) -> ReceiptStoreResult<StoredBlob> {
        let sha256 = super::hex_digest(content);
        let key = super::blob_key(&sha256, file_name);
        let mut blobs = self
            .blobs
            .write()
            .map_err(|err| ReceiptStoreError::io(std::io::Error::other(err.to_string())))?;
        blobs.insert(key.clone(), content.to_vec());
        Ok(StoredBlob {
            url: format!("memory://{key}"),
            key,
            sha256,
        })
    }

    async fn get(&self, key: &str) -> ReceiptStoreResult<Vec<u8>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|err| ReceiptStoreError::io(std::io::Error::other(err.to_string())))?;
        blobs
            .get(key)
            .cloned()
            .ok_or_else(|| ReceiptStoreError::NotFound(key.to_owned()))
    }
}

/// Notifier that records notifications for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingCommentNotifier {
    sent: Arc<RwLock<Vec<CommentNotification>>>,
}

impl RecordingCommentNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications recorded so far.
    #[must_use]
    pub fn sent(&self) -> Vec<CommentNotification> {
        self.sent
            .read()
            .map_or_else(|_| Vec::new(), |sent| sent.clone())
    }
}

#[async_trait]
impl CommentNotifier for RecordingCommentNotifier {
    async fn notify(&self, notification: &CommentNotification) -> NotifierResult<()> {
        if let Ok(mut sent) = self.sent.write() {
            sent.push(notification.clone());
        }
        Ok(())
    }
}
