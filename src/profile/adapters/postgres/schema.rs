//! Diesel schema for profile persistence.

diesel::table! {
    /// Organisation-owned bank accounts used for payouts.
    bank_accounts (id) {
        /// Account identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
    }
}

diesel::table! {
    /// Member profiles keyed by username.
    profiles (username) {
        /// Login name.
        #[max_length = 64]
        username -> Varchar,
        /// Given name.
        first_name -> Text,
        /// Family name.
        last_name -> Text,
        /// Contact email.
        email -> Text,
        /// Member account number.
        #[max_length = 13]
        bank_account -> Varchar,
        /// Clearing number.
        #[max_length = 6]
        sorting_number -> Varchar,
        /// Bank name.
        #[max_length = 30]
        bank_name -> Varchar,
        /// Preferred organisation account.
        default_account -> Nullable<Uuid>,
        /// Push-notification instance identifier.
        firebase_instance_id -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> bank_accounts (default_account));
diesel::allow_tables_to_appear_in_same_query!(bank_accounts, profiles);
