//! Diesel row models for expense persistence.

use super::schema::{comments, expense_parts, expenses, payments, receipts};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Query result and insert row for expense records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = expenses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ExpenseRow {
    /// Expense identifier.
    pub id: Uuid,
    /// Owner username.
    pub owner: String,
    /// Description.
    pub description: String,
    /// Purchase date.
    pub expense_date: NaiveDate,
    /// Confirmer username.
    pub confirmed_by: Option<String>,
    /// Confirmation time.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Reimbursing payment.
    pub reimbursement: Option<Uuid>,
    /// Ledger verification.
    pub verification: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for expense parts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = expense_parts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ExpensePartRow {
    /// Part identifier.
    pub id: Uuid,
    /// Owning expense.
    pub expense_id: Uuid,
    /// Submission order.
    pub position: i32,
    /// Committee identifier.
    pub committee_id: i32,
    /// Committee name.
    pub committee_name: String,
    /// Cost centre identifier.
    pub cost_centre_id: i32,
    /// Cost centre name.
    pub cost_centre_name: String,
    /// Budget line identifier.
    pub budget_line_id: i32,
    /// Budget line name.
    pub budget_line_name: String,
    /// Amount in öre.
    pub amount_ore: i64,
    /// Attester username.
    pub attested_by: Option<String>,
    /// Attestation time.
    pub attested_at: Option<DateTime<Utc>>,
}

/// Query result and insert row for payments.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentRow {
    /// Payment identifier.
    pub id: Uuid,
    /// Payout time.
    pub paid_at: DateTime<Utc>,
    /// Treasurer username.
    pub payer: String,
    /// Receiver username.
    pub receiver: String,
    /// Source account.
    pub account: Uuid,
}

/// Query result and insert row for receipts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = receipts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ReceiptRow {
    /// Receipt identifier.
    pub id: Uuid,
    /// Attached expense.
    pub expense_id: Option<Uuid>,
    /// Original file name.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// Store key.
    pub blob_key: String,
    /// Public URL.
    pub url: String,
    /// Hex SHA-256.
    pub sha256: String,
    /// Upload time.
    pub uploaded_at: DateTime<Utc>,
}

/// Query result and insert row for comments.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: Uuid,
    /// Expense commented on.
    pub expense_id: Uuid,
    /// Author username.
    pub author: String,
    /// Text.
    pub content: String,
    /// Posting time.
    pub posted_at: DateTime<Utc>,
}
