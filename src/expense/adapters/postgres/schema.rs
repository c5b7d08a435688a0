//! Diesel schema for expense persistence.

diesel::table! {
    /// Expense claims.
    expenses (id) {
        /// Expense identifier.
        id -> Uuid,
        /// Owner username.
        #[max_length = 64]
        owner -> Varchar,
        /// Description.
        description -> Text,
        /// Purchase date.
        expense_date -> Date,
        /// Confirmer username.
        #[max_length = 64]
        confirmed_by -> Nullable<Varchar>,
        /// Confirmation time.
        confirmed_at -> Nullable<Timestamptz>,
        /// Reimbursing payment.
        reimbursement -> Nullable<Uuid>,
        /// Ledger verification.
        #[max_length = 7]
        verification -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Budget line items of expenses.
    expense_parts (id) {
        /// Part identifier.
        id -> Uuid,
        /// Owning expense.
        expense_id -> Uuid,
        /// Submission order within the expense.
        position -> Int4,
        /// Budget system committee identifier.
        committee_id -> Int4,
        /// Committee name.
        committee_name -> Text,
        /// Budget system cost centre identifier.
        cost_centre_id -> Int4,
        /// Cost centre name.
        cost_centre_name -> Text,
        /// Budget system line identifier.
        budget_line_id -> Int4,
        /// Budget line name.
        budget_line_name -> Text,
        /// Amount in öre.
        amount_ore -> Int8,
        /// Attester username.
        #[max_length = 64]
        attested_by -> Nullable<Varchar>,
        /// Attestation time.
        attested_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Reimbursement payments.
    payments (id) {
        /// Payment identifier.
        id -> Uuid,
        /// Payout time.
        paid_at -> Timestamptz,
        /// Treasurer username.
        #[max_length = 64]
        payer -> Varchar,
        /// Receiver username.
        #[max_length = 64]
        receiver -> Varchar,
        /// Source organisation account.
        account -> Uuid,
    }
}

diesel::table! {
    /// Receipt file metadata.
    receipts (id) {
        /// Receipt identifier.
        id -> Uuid,
        /// Attached expense.
        expense_id -> Nullable<Uuid>,
        /// Original file name.
        name -> Text,
        /// MIME type.
        content_type -> Text,
        /// Store key.
        blob_key -> Text,
        /// Public URL.
        url -> Text,
        /// Hex SHA-256 of the content.
        #[max_length = 64]
        sha256 -> Varchar,
        /// Upload time.
        uploaded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on expenses.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Expense commented on.
        expense_id -> Uuid,
        /// Author username.
        #[max_length = 64]
        author -> Varchar,
        /// Text.
        content -> Text,
        /// Posting time.
        posted_at -> Timestamptz,
    }
}

diesel::joinable!(expense_parts -> expenses (expense_id));
diesel::joinable!(expenses -> payments (reimbursement));
diesel::joinable!(comments -> expenses (expense_id));
diesel::joinable!(receipts -> expenses (expense_id));
diesel::allow_tables_to_appear_in_same_query!(
    comments,
    expense_parts,
    expenses,
    payments,
    receipts,
);
