//! Serializable projections of expenses, payments, receipts, and comments.

use super::{
    Amount, Comment, Expense, ExpensePart, ExpenseStatus, LifecycleStage, Payment, Receipt,
};
use crate::profile::domain::{BankAccount, BankAccountView, Profile, UserSummary, Username};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Profiles of the users referenced by a set of projections.
#[derive(Debug, Clone, Default)]
pub struct ProfileDirectory {
    profiles: BTreeMap<Username, Profile>,
}

impl ProfileDirectory {
    /// Builds a directory from loaded profiles.
    #[must_use]
    pub fn new(profiles: impl IntoIterator<Item = Profile>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.username().clone(), profile))
                .collect(),
        }
    }

    /// Returns the profile of a user, if loaded.
    #[must_use]
    pub fn get(&self, username: &Username) -> Option<&Profile> {
        self.profiles.get(username)
    }

    /// Returns the compact summary of a user.
    #[must_use]
    pub fn summary(&self, username: &Username) -> UserSummary {
        self.get(username)
            .map_or_else(|| UserSummary::bare(username), UserSummary::from)
    }

    fn names(&self, username: &Username) -> (String, String, String) {
        let (first_name, last_name) = self.get(username).map_or_else(
            || (String::new(), String::new()),
            |profile| {
                let identity = profile.identity();
                (identity.first_name.clone(), identity.last_name.clone())
            },
        );
        (username.to_string(), first_name, last_name)
    }
}

/// Projection of a single expense part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpensePartView {
    /// Part identifier.
    pub id: String,
    /// Budget system committee identifier.
    pub committee_id: i32,
    /// Committee name.
    pub committee_name: String,
    /// Budget system cost centre identifier.
    pub cost_centre_id: i32,
    /// Cost centre name.
    pub cost_centre_name: String,
    /// Budget system line identifier.
    pub budget_line_id: i32,
    /// Budget line name.
    pub budget_line_name: String,
    /// Amount.
    pub amount: Amount,
    /// Attester login name.
    pub attested_by_username: Option<String>,
    /// Attester given name.
    pub attested_by_first_name: Option<String>,
    /// Attester family name.
    pub attested_by_last_name: Option<String>,
    /// Attestation time.
    pub attest_date: Option<DateTime<Utc>>,
}

impl ExpensePartView {
    fn new(part: &ExpensePart, directory: &ProfileDirectory) -> Self {
        let line = part.budget_line();
        let (attested_by_username, attested_by_first_name, attested_by_last_name) =
            match part.attested_by().map(|attester| directory.names(attester)) {
                Some((username, first, last)) => (Some(username), Some(first), Some(last)),
                None => (None, None, None),
            };
        Self {
            id: part.id().to_string(),
            committee_id: line.committee_id,
            committee_name: line.committee_name.clone(),
            cost_centre_id: line.cost_centre_id,
            cost_centre_name: line.cost_centre_name.clone(),
            budget_line_id: line.budget_line_id,
            budget_line_name: line.budget_line_name.clone(),
            amount: part.amount(),
            attested_by_username,
            attested_by_first_name,
            attested_by_last_name,
            attest_date: part.attested_at(),
        }
    }
}

/// Projection of an expense with its parts and reimbursement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseView {
    /// Expense identifier.
    pub id: String,
    /// Description.
    pub description: String,
    /// Purchase date.
    pub expense_date: NaiveDate,
    /// Submission time.
    pub created_date: DateTime<Utc>,
    /// Owner login name.
    pub owner_username: String,
    /// Owner given name.
    pub owner_first_name: String,
    /// Owner family name.
    pub owner_last_name: String,
    /// Confirmer login name.
    pub confirmed_by: Option<String>,
    /// Confirmation time.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Ledger verification.
    pub verification: Option<String>,
    /// Status label.
    pub status: ExpenseStatus,
    /// Coarse lifecycle stage.
    pub stage: LifecycleStage,
    /// Sum of all parts.
    pub amount: Amount,
    /// Distinct committee names, sorted.
    pub committees: Vec<String>,
    /// Parts in submission order.
    pub expense_parts: Vec<ExpensePartView>,
    /// Reimbursing payment, expanded.
    pub reimbursement: Option<PaymentView>,
}

impl ExpenseView {
    /// Builds the projection.
    #[must_use]
    pub fn new(
        expense: &Expense,
        directory: &ProfileDirectory,
        reimbursement: Option<PaymentView>,
    ) -> Self {
        let (owner_username, owner_first_name, owner_last_name) = directory.names(expense.owner());
        let status = expense.status();
        Self {
            id: expense.id().to_string(),
            description: expense.description().to_owned(),
            expense_date: expense.expense_date(),
            created_date: expense.created_at(),
            owner_username,
            owner_first_name,
            owner_last_name,
            confirmed_by: expense.confirmed_by().map(ToString::to_string),
            confirmed_at: expense.confirmed_at(),
            verification: expense.verification().map(ToString::to_string),
            stage: status.stage(),
            status,
            amount: expense.total_amount(),
            committees: expense.committees(),
            expense_parts: expense
                .parts()
                .iter()
                .map(|part| ExpensePartView::new(part, directory))
                .collect(),
            reimbursement,
        }
    }
}

/// Projection of a payment with expanded parties and account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentView {
    /// Payment identifier.
    pub id: String,
    /// Payout time.
    pub date: DateTime<Utc>,
    /// Treasurer.
    pub payer: UserSummary,
    /// Member reimbursed.
    pub receiver: UserSummary,
    /// Source account; `None` when the account record is gone.
    pub account: Option<BankAccountView>,
    /// Bank transfer reference.
    pub tag: String,
    /// Sum of the reimbursed expenses.
    pub amount: Amount,
}

impl PaymentView {
    /// Builds the projection.
    #[must_use]
    pub fn new(
        payment: &Payment,
        directory: &ProfileDirectory,
        account: Option<&BankAccount>,
        amount: Amount,
    ) -> Self {
        Self {
            id: payment.id().to_string(),
            date: payment.paid_at(),
            payer: directory.summary(payment.payer()),
            receiver: directory.summary(payment.receiver()),
            account: account.map(BankAccountView::from),
            tag: payment.tag(),
            amount,
        }
    }
}

/// Projection of a receipt file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptView {
    /// Receipt identifier.
    pub id: String,
    /// Public URL.
    pub url: String,
    /// Original file name.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// Whether the file can be shown inline.
    pub is_image: bool,
    /// Expense the receipt is attached to.
    pub expense: Option<String>,
}

impl From<&Receipt> for ReceiptView {
    fn from(receipt: &Receipt) -> Self {
        Self {
            id: receipt.id().to_string(),
            url: receipt.url().to_owned(),
            name: receipt.name().to_owned(),
            content_type: receipt.content_type().to_owned(),
            is_image: receipt.is_image(),
            expense: receipt.expense().map(|id| id.to_string()),
        }
    }
}

/// Projection of a comment with the author's names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// Comment identifier.
    pub id: String,
    /// Expense commented on.
    pub expense: String,
    /// Posting time.
    pub date: DateTime<Utc>,
    /// Text.
    pub content: String,
    /// Author login name.
    pub author_username: String,
    /// Author given name.
    pub author_first_name: String,
    /// Author family name.
    pub author_last_name: String,
}

impl CommentView {
    /// Builds the projection.
    #[must_use]
    pub fn new(comment: &Comment, directory: &ProfileDirectory) -> Self {
        let (author_username, author_first_name, author_last_name) =
            directory.names(comment.author());
        Self {
            id: comment.id().to_string(),
            expense: comment.expense().to_string(),
            date: comment.posted_at(),
            content: comment.content().to_owned(),
            author_username,
            author_first_name,
            author_last_name,
        }
    }
}

/// A member's claims grouped the way their receipts page shows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerOverview {
    /// The member.
    pub user: UserSummary,
    /// Unpaid expenses with at least one unattested part, newest first.
    pub non_attested_expenses: Vec<ExpenseView>,
    /// Unpaid, fully attested expenses, newest first.
    pub attested_expenses: Vec<ExpenseView>,
    /// Payments received, newest first.
    pub reimbursements: Vec<PaymentView>,
    /// Sum of every part the member has ever claimed.
    pub total: Amount,
}
