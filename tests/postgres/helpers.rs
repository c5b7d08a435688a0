//! Shared test helpers for `PostgreSQL` integration tests.
//!
//! Tests connect to the server named by [`DATABASE_URL_VAR`] and run inside a
//! fresh schema that is dropped afterwards. When the variable is unset the
//! tests return early without touching a database.

use cashflow::expense::adapters::postgres::PostgresExpenseRepository;
use cashflow::expense::domain::{Amount, BudgetLine, Expense, ExpensePart};
use cashflow::profile::adapters::postgres::{CashflowPgPool, PostgresProfileRepository};
use cashflow::profile::domain::{Profile, UserIdentity, Username};
use cashflow::profile::ports::ProfileRepository;
use chrono::NaiveDate;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use eyre::WrapErr;
use mockable::DefaultClock;
use uuid::Uuid;

/// Environment variable naming the server used by these tests.
pub const DATABASE_URL_VAR: &str = "CASHFLOW_TEST_DATABASE_URL";

/// SQL to create the schema for tests.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_cashflow_tables/up.sql");

/// Points every pooled connection at the test schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// A migrated schema with repositories bound to it.
pub struct TestDatabase {
    url: String,
    schema: String,
    /// Expense, payment, comment, and receipt repository.
    pub expenses: PostgresExpenseRepository,
    /// Profile and bank account repository.
    pub profiles: PostgresProfileRepository,
    pool: CashflowPgPool,
}

impl TestDatabase {
    /// Creates and migrates a fresh schema.
    ///
    /// Returns `None` when no test server is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if connecting, creating the schema, or migrating
    /// fails.
    pub async fn create() -> eyre::Result<Option<Self>> {
        let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
            return Ok(None);
        };
        let schema = format!("cashflow_test_{}", Uuid::new_v4().simple());
        let database = tokio::task::spawn_blocking(move || Self::migrate(url, schema))
            .await
            .wrap_err("migration task panicked")??;
        Ok(Some(database))
    }

    fn migrate(url: String, schema: String) -> eyre::Result<Self> {
        let mut connection = PgConnection::establish(&url).wrap_err("connect to test server")?;
        connection
            .batch_execute(&format!("CREATE SCHEMA {schema}; SET search_path TO {schema};"))
            .wrap_err("create test schema")?;
        connection
            .batch_execute(CREATE_SCHEMA_SQL)
            .wrap_err("apply migrations")?;

        let pool = Pool::builder()
            .max_size(2)
            .connection_customizer(Box::new(SearchPath(schema.clone())))
            .build(ConnectionManager::<PgConnection>::new(url.as_str()))
            .wrap_err("build connection pool")?;
        Ok(Self {
            url,
            schema,
            expenses: PostgresExpenseRepository::new(pool.clone()),
            profiles: PostgresProfileRepository::new(pool.clone()),
            pool,
        })
    }

    /// Counts rows of `table` matching a raw SQL condition.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count(&self, table: &str, condition: &str) -> eyre::Result<i64> {
        #[derive(QueryableByName)]
        struct Count {
            #[diesel(sql_type = diesel::sql_types::BigInt)]
            total: i64,
        }

        let pool = self.pool.clone();
        let query = format!("SELECT COUNT(*) AS total FROM {table} WHERE {condition}");
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().wrap_err("checkout connection")?;
            let row: Count = diesel::sql_query(query)
                .get_result(&mut connection)
                .wrap_err("count rows")?;
            Ok(row.total)
        })
        .await
        .wrap_err("count task panicked")?
    }

    /// Stores a member profile so foreign keys resolve.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is invalid or storing fails.
    pub async fn member(&self, raw: &str) -> eyre::Result<Profile> {
        let identity = UserIdentity::new(
            Username::new(raw).wrap_err("parse username")?,
            raw,
            "Medlem",
            format!("{raw}@example.org"),
        );
        let profile = Profile::new(identity, &DefaultClock);
        self.profiles
            .store(&profile)
            .await
            .wrap_err("store profile")?;
        Ok(profile)
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let dropped = PgConnection::establish(&self.url).map(|mut connection| {
            connection.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
        });
        if !matches!(dropped, Ok(Ok(()))) {
            tracing::warn!(schema = %self.schema, "could not drop test schema");
        }
    }
}

/// Builds an expense with one 100 kr part per committee.
///
/// # Errors
///
/// Returns an error if any value fails validation.
pub fn expense(owner: &Profile, committees: &[&str]) -> eyre::Result<Expense> {
    let parts = committees
        .iter()
        .map(|committee| {
            ExpensePart::new(
                BudgetLine::named(*committee, "Verksamhet", "Fika"),
                Amount::parse("100")?,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    let date = NaiveDate::from_ymd_opt(2024, 3, 14).ok_or_else(|| eyre::eyre!("bad date"))?;
    Ok(Expense::new(
        owner.username().clone(),
        "Fika till mötet",
        date,
        parts,
        &DefaultClock,
    )?)
}
