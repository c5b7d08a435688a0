//! `PostgreSQL` repository implementations for the expense context.

use super::{
    mapping::{
        row_to_comment, row_to_expense, row_to_payment, row_to_receipt, to_comment_row,
        to_expense_row, to_part_rows, to_payment_row, to_receipt_row,
    },
    models::{CommentRow, ExpensePartRow, ExpenseRow, PaymentRow, ReceiptRow},
    schema::{comments, expense_parts, expenses, payments, receipts},
};
use crate::expense::{
    domain::{
        Comment, Expense, ExpenseId, ExpensePartId, Payment, PaymentId, Receipt, ReceiptId,
    },
    ports::{
        CommentRepository, ExpenseRepository, ExpenseRepositoryError, ExpenseRepositoryResult,
        PaymentRepository, ReceiptRepository,
    },
};
use crate::profile::{adapters::postgres::CashflowPgPool, domain::Username};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;
use uuid::Uuid;

/// `PostgreSQL`-backed expense, payment, comment, and receipt repository.
#[derive(Debug, Clone)]
pub struct PostgresExpenseRepository {
    pool: CashflowPgPool,
}

impl PostgresExpenseRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CashflowPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ExpenseRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ExpenseRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ExpenseRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ExpenseRepositoryError::persistence)?
    }
}

fn is_unique_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Loads the parts of the given expenses and assembles the aggregates,
/// preserving the order of `rows`.
fn hydrate(
    connection: &mut PgConnection,
    rows: Vec<ExpenseRow>,
) -> ExpenseRepositoryResult<Vec<Expense>> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let part_rows = expense_parts::table
        .filter(expense_parts::expense_id.eq_any(&ids))
        .order((expense_parts::expense_id.asc(), expense_parts::position.asc()))
        .select(ExpensePartRow::as_select())
        .load::<ExpensePartRow>(connection)
        .map_err(ExpenseRepositoryError::persistence)?;

    let mut grouped: HashMap<Uuid, Vec<ExpensePartRow>> = HashMap::new();
    for part in part_rows {
        grouped.entry(part.expense_id).or_default().push(part);
    }
    rows.into_iter()
        .map(|row| {
            let parts = grouped.remove(&row.id).unwrap_or_default();
            row_to_expense(row, parts)
        })
        .collect()
}

fn load_rows(
    connection: &mut PgConnection,
    result: QueryResult<Vec<ExpenseRow>>,
) -> ExpenseRepositoryResult<Vec<Expense>> {
    let rows = result.map_err(ExpenseRepositoryError::persistence)?;
    hydrate(connection, rows)
}

fn insert_parts(connection: &mut PgConnection, expense: &Expense) -> ExpenseRepositoryResult<()> {
    let rows = to_part_rows(expense)?;
    diesel::insert_into(expense_parts::table)
        .values(&rows)
        .execute(connection)
        .map_err(ExpenseRepositoryError::persistence)?;
    Ok(())
}

#[async_trait]
impl ExpenseRepository for PostgresExpenseRepository {
    async fn store(&self, expense: &Expense) -> ExpenseRepositoryResult<()> {
        let expense_id = expense.id();
        let row = to_expense_row(expense);
        let aggregate = expense.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, ExpenseRepositoryError, _>(|tx| {
                diesel::insert_into(expenses::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| {
                        if is_unique_violation(&err) {
                            ExpenseRepositoryError::DuplicateExpense(expense_id)
                        } else {
                            ExpenseRepositoryError::persistence(err)
                        }
                    })?;
                insert_parts(tx, &aggregate)
            })
        })
        .await
    }

    async fn update(&self, expense: &Expense) -> ExpenseRepositoryResult<()> {
        let expense_id = expense.id();
        let row = to_expense_row(expense);
        let aggregate = expense.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, ExpenseRepositoryError, _>(|tx| {
                let updated_count =
                    diesel::update(expenses::table.filter(expenses::id.eq(row.id)))
                        .set(&row)
                        .execute(tx)
                        .map_err(ExpenseRepositoryError::persistence)?;
                if updated_count == 0 {
                    return Err(ExpenseRepositoryError::ExpenseNotFound(expense_id));
                }
                diesel::delete(expense_parts::table.filter(expense_parts::expense_id.eq(row.id)))
                    .execute(tx)
                    .map_err(ExpenseRepositoryError::persistence)?;
                insert_parts(tx, &aggregate)
            })
        })
        .await
    }

    async fn delete(&self, id: ExpenseId) -> ExpenseRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count =
                diesel::delete(expenses::table.filter(expenses::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(ExpenseRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(ExpenseRepositoryError::ExpenseNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ExpenseId) -> ExpenseRepositoryResult<Option<Expense>> {
        self.run_blocking(move |connection| {
            let result = expenses::table
                .filter(expenses::id.eq(id.into_inner()))
                .select(ExpenseRow::as_select())
                .load::<ExpenseRow>(connection);
            Ok(load_rows(connection, result)?.into_iter().next())
        })
        .await
    }

    async fn find_by_part(&self, part: ExpensePartId) -> ExpenseRepositoryResult<Option<Expense>> {
        self.run_blocking(move |connection| {
            let owner_id = expense_parts::table
                .filter(expense_parts::id.eq(part.into_inner()))
                .select(expense_parts::expense_id)
                .first::<Uuid>(connection)
                .optional()
                .map_err(ExpenseRepositoryError::persistence)?;
            let Some(expense_id) = owner_id else {
                return Ok(None);
            };
            let result = expenses::table
                .filter(expenses::id.eq(expense_id))
                .select(ExpenseRow::as_select())
                .load::<ExpenseRow>(connection);
            Ok(load_rows(connection, result)?.into_iter().next())
        })
        .await
    }

    async fn list_by_owner(&self, owner: &Username) -> ExpenseRepositoryResult<Vec<Expense>> {
        let lookup = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let result = expenses::table
                .filter(expenses::owner.eq(lookup))
                .order(expenses::created_at.desc())
                .select(ExpenseRow::as_select())
                .load::<ExpenseRow>(connection);
            load_rows(connection, result)
        })
        .await
    }

    async fn list_unreimbursed(&self) -> ExpenseRepositoryResult<Vec<Expense>> {
        self.run_blocking(move |connection| {
            let result = expenses::table
                .filter(expenses::reimbursement.is_null())
                .order(expenses::created_at.asc())
                .select(ExpenseRow::as_select())
                .load::<ExpenseRow>(connection);
            load_rows(connection, result)
        })
        .await
    }

    async fn list_by_reimbursement(
        &self,
        payment: PaymentId,
    ) -> ExpenseRepositoryResult<Vec<Expense>> {
        self.run_blocking(move |connection| {
            let result = expenses::table
                .filter(expenses::reimbursement.eq(payment.into_inner()))
                .order(expenses::created_at.asc())
                .select(ExpenseRow::as_select())
                .load::<ExpenseRow>(connection);
            load_rows(connection, result)
        })
        .await
    }

    async fn list_reimbursed_unbooked(&self) -> ExpenseRepositoryResult<Vec<Expense>> {
        self.run_blocking(move |connection| {
            let result = expenses::table
                .filter(expenses::reimbursement.is_not_null())
                .filter(expenses::verification.is_null())
                .order(expenses::expense_date.asc())
                .select(ExpenseRow::as_select())
                .load::<ExpenseRow>(connection);
            load_rows(connection, result)
        })
        .await
    }
}

#[async_trait]
impl PaymentRepository for PostgresExpenseRepository {
    async fn store(&self, payment: &Payment) -> ExpenseRepositoryResult<()> {
        let payment_id = payment.id();
        let row = to_payment_row(payment);
        self.run_blocking(move |connection| {
            diesel::insert_into(payments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        ExpenseRepositoryError::DuplicatePayment(payment_id)
                    } else {
                        ExpenseRepositoryError::persistence(err)
                    }
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: PaymentId) -> ExpenseRepositoryResult<Option<Payment>> {
        self.run_blocking(move |connection| {
            let row = payments::table
                .filter(payments::id.eq(id.into_inner()))
                .select(PaymentRow::as_select())
                .first::<PaymentRow>(connection)
                .optional()
                .map_err(ExpenseRepositoryError::persistence)?;
            row.map(row_to_payment).transpose()
        })
        .await
    }

    async fn list_by_receiver(&self, receiver: &Username) -> ExpenseRepositoryResult<Vec<Payment>> {
        let lookup = receiver.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = payments::table
                .filter(payments::receiver.eq(lookup))
                .order(payments::paid_at.desc())
                .select(PaymentRow::as_select())
                .load::<PaymentRow>(connection)
                .map_err(ExpenseRepositoryError::persistence)?;
            rows.into_iter().map(row_to_payment).collect()
        })
        .await
    }
}

#[async_trait]
impl CommentRepository for PostgresExpenseRepository {
    async fn store(&self, comment: &Comment) -> ExpenseRepositoryResult<()> {
        let comment_id = comment.id();
        let row = to_comment_row(comment);
        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        ExpenseRepositoryError::DuplicateComment(comment_id)
                    } else {
                        ExpenseRepositoryError::persistence(err)
                    }
                })?;
            Ok(())
        })
        .await
    }

    async fn list_by_expense(&self, expense: ExpenseId) -> ExpenseRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .filter(comments::expense_id.eq(expense.into_inner()))
                .order(comments::posted_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(ExpenseRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }
}

#[async_trait]
impl ReceiptRepository for PostgresExpenseRepository {
    async fn store(&self, receipt: &Receipt) -> ExpenseRepositoryResult<()> {
        let receipt_id = receipt.id();
        let row = to_receipt_row(receipt);
        self.run_blocking(move |connection| {
            diesel::insert_into(receipts::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        ExpenseRepositoryError::DuplicateReceipt(receipt_id)
                    } else {
                        ExpenseRepositoryError::persistence(err)
                    }
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, receipt: &Receipt) -> ExpenseRepositoryResult<()> {
        let receipt_id = receipt.id();
        let row = to_receipt_row(receipt);
        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(receipts::table.filter(receipts::id.eq(receipt_id.into_inner())))
                    .set(&row)
                    .execute(connection)
                    .map_err(ExpenseRepositoryError::persistence)?;
            if updated_count == 0 {
                return Err(ExpenseRepositoryError::ReceiptNotFound(receipt_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ReceiptId) -> ExpenseRepositoryResult<Option<Receipt>> {
        self.run_blocking(move |connection| {
            let row = receipts::table
                .filter(receipts::id.eq(id.into_inner()))
                .select(ReceiptRow::as_select())
                .first::<ReceiptRow>(connection)
                .optional()
                .map_err(ExpenseRepositoryError::persistence)?;
            Ok(row.map(row_to_receipt))
        })
        .await
    }

    async fn list_by_expense(&self, expense: ExpenseId) -> ExpenseRepositoryResult<Vec<Receipt>> {
        self.run_blocking(move |connection| {
            let rows = receipts::table
                .filter(receipts::expense_id.eq(expense.into_inner()))
                .order(receipts::uploaded_at.asc())
                .select(ReceiptRow::as_select())
                .load::<ReceiptRow>(connection)
                .map_err(ExpenseRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_receipt).collect())
        })
        .await
    }
}
