//! Diesel row models for profile persistence.

use super::schema::{bank_accounts, profiles};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for profile records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(primary_key(username))]
#[diesel(treat_none_as_null = true)]
pub struct ProfileRow {
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Member account number.
    pub bank_account: String,
    /// Clearing number.
    pub sorting_number: String,
    /// Bank name.
    pub bank_name: String,
    /// Preferred organisation account.
    pub default_account: Option<uuid::Uuid>,
    /// Push-notification instance identifier.
    pub firebase_instance_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for organisation bank accounts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = bank_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BankAccountRow {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
}
