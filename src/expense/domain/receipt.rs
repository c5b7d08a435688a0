//! Uploaded receipt files.

use super::{ExpenseDomainError, ExpenseId, ReceiptId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static IMAGE_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^.*\.(jpg|jpeg|png|gif|bmp)").ok());

/// Where the stored bytes of a receipt live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlob {
    /// Key inside the receipt store.
    pub key: String,
    /// Public URL of the blob.
    pub url: String,
    /// Hex-encoded SHA-256 of the content.
    pub sha256: String,
}

/// A receipt file, optionally attached to an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    id: ReceiptId,
    expense: Option<ExpenseId>,
    name: String,
    content_type: String,
    blob: StoredBlob,
    uploaded_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReceiptData {
    /// Persisted receipt identifier.
    pub id: ReceiptId,
    /// Persisted expense attachment, if any.
    pub expense: Option<ExpenseId>,
    /// Persisted original file name.
    pub name: String,
    /// Persisted MIME type.
    pub content_type: String,
    /// Persisted storage location.
    pub blob: StoredBlob,
    /// Persisted upload time.
    pub uploaded_at: DateTime<Utc>,
}

impl Receipt {
    /// Creates a receipt for freshly stored content.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::EmptyReceiptName`] for a blank name.
    pub fn new(
        expense: Option<ExpenseId>,
        name: impl Into<String>,
        content_type: impl Into<String>,
        blob: StoredBlob,
        clock: &impl Clock,
    ) -> Result<Self, ExpenseDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ExpenseDomainError::EmptyReceiptName);
        }
        Ok(Self {
            id: ReceiptId::new(),
            expense,
            name: trimmed.to_owned(),
            content_type: content_type.into(),
            blob,
            uploaded_at: clock.utc(),
        })
    }

    /// Reconstructs a receipt from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReceiptData) -> Self {
        Self {
            id: data.id,
            expense: data.expense,
            name: data.name,
            content_type: data.content_type,
            blob: data.blob,
            uploaded_at: data.uploaded_at,
        }
    }

    /// Returns the receipt identifier.
    #[must_use]
    pub const fn id(&self) -> ReceiptId {
        self.id
    }

    /// Returns the expense the receipt belongs to, if any.
    #[must_use]
    pub const fn expense(&self) -> Option<ExpenseId> {
        self.expense
    }

    /// Returns the original file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the MIME type reported at upload.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the storage location.
    #[must_use]
    pub const fn blob(&self) -> &StoredBlob {
        &self.blob
    }

    /// Returns the public URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.blob.url
    }

    /// Returns the upload time.
    #[must_use]
    pub const fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    /// Returns `true` when the file name looks like a common image format.
    #[must_use]
    pub fn is_image(&self) -> bool {
        IMAGE_NAME
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(&self.name))
    }

    /// Detaches the receipt from its expense; the blob is kept.
    ///
    /// Returns the expense it was attached to.
    pub const fn detach(&mut self) -> Option<ExpenseId> {
        self.expense.take()
    }
}
