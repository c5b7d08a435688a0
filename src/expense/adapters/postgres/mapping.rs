//! Conversions between Diesel rows and expense domain types.

use super::models::{CommentRow, ExpensePartRow, ExpenseRow, PaymentRow, ReceiptRow};
use crate::expense::{
    domain::{
        Amount, BudgetLine, Comment, CommentId, Expense, ExpenseId, ExpensePart, ExpensePartId,
        Payment, PaymentId, PersistedCommentData, PersistedExpenseData, PersistedExpensePartData,
        PersistedPaymentData, PersistedReceiptData, Receipt, ReceiptId, StoredBlob, Verification,
    },
    ports::{ExpenseRepositoryError, ExpenseRepositoryResult},
};
use crate::profile::domain::{BankAccountId, Username};

fn username(value: String) -> ExpenseRepositoryResult<Username> {
    Username::new(value).map_err(ExpenseRepositoryError::persistence)
}

fn optional_username(value: Option<String>) -> ExpenseRepositoryResult<Option<Username>> {
    value.map(username).transpose()
}

pub(super) fn to_expense_row(expense: &Expense) -> ExpenseRow {
    ExpenseRow {
        id: expense.id().into_inner(),
        owner: expense.owner().as_str().to_owned(),
        description: expense.description().to_owned(),
        expense_date: expense.expense_date(),
        confirmed_by: expense.confirmed_by().map(|user| user.as_str().to_owned()),
        confirmed_at: expense.confirmed_at(),
        reimbursement: expense.reimbursement().map(PaymentId::into_inner),
        verification: expense.verification().map(|v| v.as_str().to_owned()),
        created_at: expense.created_at(),
        updated_at: expense.updated_at(),
    }
}

pub(super) fn to_part_rows(expense: &Expense) -> ExpenseRepositoryResult<Vec<ExpensePartRow>> {
    expense
        .parts()
        .iter()
        .enumerate()
        .map(|(index, part)| {
            let line = part.budget_line();
            Ok(ExpensePartRow {
                id: part.id().into_inner(),
                expense_id: expense.id().into_inner(),
                position: i32::try_from(index).map_err(ExpenseRepositoryError::persistence)?,
                committee_id: line.committee_id,
                committee_name: line.committee_name.clone(),
                cost_centre_id: line.cost_centre_id,
                cost_centre_name: line.cost_centre_name.clone(),
                budget_line_id: line.budget_line_id,
                budget_line_name: line.budget_line_name.clone(),
                amount_ore: part.amount().ore(),
                attested_by: part.attested_by().map(|user| user.as_str().to_owned()),
                attested_at: part.attested_at(),
            })
        })
        .collect()
}

fn row_to_part(row: ExpensePartRow) -> ExpenseRepositoryResult<ExpensePart> {
    let ExpensePartRow {
        id,
        committee_id,
        committee_name,
        cost_centre_id,
        cost_centre_name,
        budget_line_id,
        budget_line_name,
        amount_ore,
        attested_by,
        attested_at,
        ..
    } = row;
    Ok(ExpensePart::from_persisted(PersistedExpensePartData {
        id: ExpensePartId::from_uuid(id),
        budget_line: BudgetLine {
            committee_id,
            committee_name,
            cost_centre_id,
            cost_centre_name,
            budget_line_id,
            budget_line_name,
        },
        amount: Amount::from_ore(amount_ore),
        attested_by: optional_username(attested_by)?,
        attested_at,
    }))
}

/// Rebuilds an expense from its row and its part rows in position order.
pub(super) fn row_to_expense(
    row: ExpenseRow,
    part_rows: Vec<ExpensePartRow>,
) -> ExpenseRepositoryResult<Expense> {
    let parts = part_rows
        .into_iter()
        .map(row_to_part)
        .collect::<ExpenseRepositoryResult<Vec<_>>>()?;
    let verification = row
        .verification
        .map(Verification::new)
        .transpose()
        .map_err(ExpenseRepositoryError::persistence)?;
    Ok(Expense::from_persisted(PersistedExpenseData {
        id: ExpenseId::from_uuid(row.id),
        owner: username(row.owner)?,
        description: row.description,
        expense_date: row.expense_date,
        parts,
        confirmed_by: optional_username(row.confirmed_by)?,
        confirmed_at: row.confirmed_at,
        reimbursement: row.reimbursement.map(PaymentId::from_uuid),
        verification,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

pub(super) fn to_payment_row(payment: &Payment) -> PaymentRow {
    PaymentRow {
        id: payment.id().into_inner(),
        paid_at: payment.paid_at(),
        payer: payment.payer().as_str().to_owned(),
        receiver: payment.receiver().as_str().to_owned(),
        account: payment.account().into_inner(),
    }
}

pub(super) fn row_to_payment(row: PaymentRow) -> ExpenseRepositoryResult<Payment> {
    Ok(Payment::from_persisted(PersistedPaymentData {
        id: PaymentId::from_uuid(row.id),
        paid_at: row.paid_at,
        payer: username(row.payer)?,
        receiver: username(row.receiver)?,
        account: BankAccountId::from_uuid(row.account),
    }))
}

pub(super) fn to_receipt_row(receipt: &Receipt) -> ReceiptRow {
    let blob = receipt.blob();
    ReceiptRow {
        id: receipt.id().into_inner(),
        expense_id: receipt.expense().map(ExpenseId::into_inner),
        name: receipt.name().to_owned(),
        content_type: receipt.content_type().to_owned(),
        blob_key: blob.key.clone(),
        url: blob.url.clone(),
        sha256: blob.sha256.clone(),
        uploaded_at: receipt.uploaded_at(),
    }
}

pub(super) fn row_to_receipt(row: ReceiptRow) -> Receipt {
    Receipt::from_persisted(PersistedReceiptData {
        id: ReceiptId::from_uuid(row.id),
        expense: row.expense_id.map(ExpenseId::from_uuid),
        name: row.name,
        content_type: row.content_type,
        blob: StoredBlob {
            key: row.blob_key,
            url: row.url,
            sha256: row.sha256,
        },
        uploaded_at: row.uploaded_at,
    })
}

pub(super) fn to_comment_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: comment.id().into_inner(),
        expense_id: comment.expense().into_inner(),
        author: comment.author().as_str().to_owned(),
        content: comment.content().to_owned(),
        posted_at: comment.posted_at(),
    }
}

pub(super) fn row_to_comment(row: CommentRow) -> ExpenseRepositoryResult<Comment> {
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        expense: ExpenseId::from_uuid(row.expense_id),
        author: username(row.author)?,
        content: row.content,
        posted_at: row.posted_at,
    }))
}
