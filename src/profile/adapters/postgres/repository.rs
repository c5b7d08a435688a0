//! `PostgreSQL` repository implementations for profiles and bank accounts.

use super::{
    models::{BankAccountRow, ProfileRow},
    schema::{bank_accounts, profiles},
};
use crate::profile::{
    domain::{
        BankAccount, BankAccountId, BankDetails, PersistedProfileData, Profile, UserIdentity,
        Username,
    },
    ports::{
        BankAccountRepository, ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type shared by all adapters.
pub type CashflowPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed profile and bank account repository.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: CashflowPgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CashflowPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProfileRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProfileRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let username = profile.username().clone();
        let row = to_profile_row(profile);

        self.run_blocking(move |connection| {
            diesel::insert_into(profiles::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProfileRepositoryError::DuplicateProfile(username.clone())
                    }
                    _ => ProfileRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let username = profile.username().clone();
        let row = to_profile_row(profile);

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(profiles::table.filter(profiles::username.eq(username.as_str())))
                    .set(&row)
                    .execute(connection)
                    .map_err(ProfileRepositoryError::persistence)?;
            if updated_count == 0 {
                return Err(ProfileRepositoryError::NotFound(username));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> ProfileRepositoryResult<Option<Profile>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = profiles::table
                .filter(profiles::username.eq(&lookup))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProfileRepositoryResult<Vec<Profile>> {
        self.run_blocking(move |connection| {
            let rows = profiles::table
                .order(profiles::username.asc())
                .select(ProfileRow::as_select())
                .load::<ProfileRow>(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            rows.into_iter().map(row_to_profile).collect()
        })
        .await
    }
}

#[async_trait]
impl BankAccountRepository for PostgresProfileRepository {
    async fn store(&self, account: &BankAccount) -> ProfileRepositoryResult<()> {
        let account_id = account.id();
        let row = BankAccountRow {
            id: account_id.into_inner(),
            name: account.name().to_owned(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(bank_accounts::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProfileRepositoryError::DuplicateBankAccount(account_id)
                    }
                    _ => ProfileRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: BankAccountId) -> ProfileRepositoryResult<Option<BankAccount>> {
        self.run_blocking(move |connection| {
            let row = bank_accounts::table
                .filter(bank_accounts::id.eq(id.into_inner()))
                .select(BankAccountRow::as_select())
                .first::<BankAccountRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            row.map(row_to_bank_account).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProfileRepositoryResult<Vec<BankAccount>> {
        self.run_blocking(move |connection| {
            let rows = bank_accounts::table
                .order(bank_accounts::name.asc())
                .select(BankAccountRow::as_select())
                .load::<BankAccountRow>(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            rows.into_iter().map(row_to_bank_account).collect()
        })
        .await
    }
}

fn to_profile_row(profile: &Profile) -> ProfileRow {
    let identity = profile.identity();
    let details = profile.bank_details();
    ProfileRow {
        username: identity.username.as_str().to_owned(),
        first_name: identity.first_name.clone(),
        last_name: identity.last_name.clone(),
        email: identity.email.clone(),
        bank_account: details.bank_account().to_owned(),
        sorting_number: details.sorting_number().to_owned(),
        bank_name: details.bank_name().to_owned(),
        default_account: profile.default_account().map(BankAccountId::into_inner),
        firebase_instance_id: profile.firebase_instance_id().to_owned(),
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    }
}

fn row_to_profile(row: ProfileRow) -> ProfileRepositoryResult<Profile> {
    let ProfileRow {
        username,
        first_name,
        last_name,
        email,
        bank_account,
        sorting_number,
        bank_name,
        default_account,
        firebase_instance_id,
        created_at,
        updated_at,
    } = row;

    let parsed_username = Username::new(username).map_err(ProfileRepositoryError::persistence)?;
    let bank_details = BankDetails::new(bank_account, sorting_number, bank_name)
        .map_err(ProfileRepositoryError::persistence)?;

    Ok(Profile::from_persisted(PersistedProfileData {
        identity: UserIdentity::new(parsed_username, first_name, last_name, email),
        bank_details,
        default_account: default_account.map(BankAccountId::from_uuid),
        firebase_instance_id,
        created_at,
        updated_at,
    }))
}

fn row_to_bank_account(row: BankAccountRow) -> ProfileRepositoryResult<BankAccount> {
    BankAccount::from_parts(BankAccountId::from_uuid(row.id), row.name)
        .map_err(ProfileRepositoryError::persistence)
}
