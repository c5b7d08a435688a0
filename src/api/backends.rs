//! Adapter sets for production and for local runs without infrastructure.

use std::sync::Arc;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use reqwest::Client;

use super::{Adapters, Backend};
use crate::auth::adapters::{http::HttpIdentityProvider, memory::StaticIdentityProvider};
use crate::authz::adapters::{http::HttpPermissionSource, memory::StaticPermissionSource};
use crate::config::AppConfig;
use crate::expense::adapters::{
    filesystem::FilesystemReceiptStore,
    mail::{MailNotifier, NoopCommentNotifier, SpamCommentNotifier},
    memory::{
        InMemoryCommentRepository, InMemoryExpenseRepository, InMemoryPaymentRepository,
        InMemoryReceiptRepository, InMemoryReceiptStore, RecordingCommentNotifier,
    },
    postgres::PostgresExpenseRepository,
};
use crate::expense::ports::ReceiptStoreError;
use crate::profile::adapters::{
    memory::{InMemoryBankAccountRepository, InMemoryProfileRepository},
    postgres::{CashflowPgPool, PostgresProfileRepository},
};

/// `PostgreSQL`, filesystem, and organisation web services.
#[derive(Debug, Clone, Copy)]
pub struct ProductionBackend;

impl Backend for ProductionBackend {
    type Expenses = PostgresExpenseRepository;
    type Payments = PostgresExpenseRepository;
    type Comments = PostgresExpenseRepository;
    type Receipts = PostgresExpenseRepository;
    type Blobs = FilesystemReceiptStore;
    type Profiles = PostgresProfileRepository;
    type Accounts = PostgresProfileRepository;
    type Notifier = MailNotifier;
    type Identity = HttpIdentityProvider;
    type Permissions = HttpPermissionSource;
}

/// Errors raised while building production adapters.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The connection pool could not be created.
    #[error("database pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// The receipt directory could not be opened.
    #[error(transparent)]
    Receipts(#[from] ReceiptStoreError),
}

impl ProductionBackend {
    /// Connects every production adapter described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the database or receipt directory is
    /// unavailable.
    pub fn connect(config: &AppConfig) -> Result<Adapters<Self>, BackendError> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
        let pool: CashflowPgPool = Pool::builder().build(manager)?;
        let expenses = Arc::new(PostgresExpenseRepository::new(pool.clone()));
        let profiles = Arc::new(PostgresProfileRepository::new(pool));
        let client = Client::new();

        let notifier = if config.send_emails {
            MailNotifier::Spam(SpamCommentNotifier::new(
                client.clone(),
                config.spam_url.as_str(),
                config.spam_api_key.as_str(),
            ))
        } else {
            MailNotifier::Disabled(NoopCommentNotifier)
        };
        let blobs =
            FilesystemReceiptStore::open(&config.receipts_dir, config.receipts_base_url.as_str())?;

        Ok(Adapters {
            expenses: Arc::clone(&expenses),
            payments: Arc::clone(&expenses),
            comments: Arc::clone(&expenses),
            receipts: expenses,
            blobs: Arc::new(blobs),
            profiles: Arc::clone(&profiles),
            accounts: profiles,
            notifier: Arc::new(notifier),
            identity: Arc::new(HttpIdentityProvider::new(
                client.clone(),
                &config.login_url,
                config.login_key.as_str(),
            )),
            permissions: Arc::new(HttpPermissionSource::new(
                client,
                &config.pls_url,
                config.pls_system.as_str(),
            )),
        })
    }
}

/// In-memory adapters with static tokens and roles.
#[derive(Debug, Clone, Copy)]
pub struct MemoryBackend;

impl Backend for MemoryBackend {
    type Expenses = InMemoryExpenseRepository;
    type Payments = InMemoryPaymentRepository;
    type Comments = InMemoryCommentRepository;
    type Receipts = InMemoryReceiptRepository;
    type Blobs = InMemoryReceiptStore;
    type Profiles = InMemoryProfileRepository;
    type Accounts = InMemoryBankAccountRepository;
    type Notifier = RecordingCommentNotifier;
    type Identity = StaticIdentityProvider;
    type Permissions = StaticPermissionSource;
}

impl MemoryBackend {
    /// Creates empty in-memory adapters around the given token and role
    /// tables.
    #[must_use]
    pub fn adapters(
        identity: Arc<StaticIdentityProvider>,
        permissions: Arc<StaticPermissionSource>,
        notifier: Arc<RecordingCommentNotifier>,
    ) -> Adapters<Self> {
        Adapters {
            expenses: Arc::new(InMemoryExpenseRepository::new()),
            payments: Arc::new(InMemoryPaymentRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            receipts: Arc::new(InMemoryReceiptRepository::new()),
            blobs: Arc::new(InMemoryReceiptStore::new()),
            profiles: Arc::new(InMemoryProfileRepository::new()),
            accounts: Arc::new(InMemoryBankAccountRepository::new()),
            notifier,
            identity,
            permissions,
        }
    }
}
