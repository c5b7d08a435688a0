//! Shared application state and the adapter set it is built from.

use std::sync::Arc;

use super::session::SessionKeys;
use crate::auth::{ports::IdentityProvider, services::LoginService};
use crate::authz::{ports::PermissionSource, services::Authorizer};
use crate::expense::{
    ports::{
        CommentNotifier, CommentRepository, ExpenseRepository, PaymentRepository,
        ReceiptRepository, ReceiptStore,
    },
    services::{
        CommentService, ExpenseLifecycleService, ExpenseProjector, PaymentService, ReceiptService,
    },
};
use crate::profile::{
    ports::{BankAccountRepository, ProfileRepository},
    services::ProfileService,
};
use mockable::DefaultClock;

/// Names the adapter behind every port the HTTP surface needs.
pub trait Backend: Send + Sync + 'static {
    /// Expense aggregate storage.
    type Expenses: ExpenseRepository + 'static;
    /// Payment storage.
    type Payments: PaymentRepository + 'static;
    /// Comment storage.
    type Comments: CommentRepository + 'static;
    /// Receipt record storage.
    type Receipts: ReceiptRepository + 'static;
    /// Receipt content storage.
    type Blobs: ReceiptStore + 'static;
    /// Profile storage.
    type Profiles: ProfileRepository + 'static;
    /// Organisation bank account storage.
    type Accounts: BankAccountRepository + 'static;
    /// Comment email delivery.
    type Notifier: CommentNotifier + 'static;
    /// Sign-on token verification.
    type Identity: IdentityProvider + 'static;
    /// Role lookup.
    type Permissions: PermissionSource + 'static;
}

/// Concrete adapters for one [`Backend`].
pub struct Adapters<B: Backend> {
    /// Expense aggregate storage.
    pub expenses: Arc<B::Expenses>,
    /// Payment storage.
    pub payments: Arc<B::Payments>,
    /// Comment storage.
    pub comments: Arc<B::Comments>,
    /// Receipt record storage.
    pub receipts: Arc<B::Receipts>,
    /// Receipt content storage.
    pub blobs: Arc<B::Blobs>,
    /// Profile storage.
    pub profiles: Arc<B::Profiles>,
    /// Organisation bank account storage.
    pub accounts: Arc<B::Accounts>,
    /// Comment email delivery.
    pub notifier: Arc<B::Notifier>,
    /// Sign-on token verification.
    pub identity: Arc<B::Identity>,
    /// Role lookup.
    pub permissions: Arc<B::Permissions>,
}

type Comments<B> = CommentService<
    <B as Backend>::Comments,
    <B as Backend>::Expenses,
    <B as Backend>::Profiles,
    <B as Backend>::Notifier,
    DefaultClock,
>;

/// Services shared by every request handler.
pub struct AppState<B: Backend> {
    pub(crate) sessions: SessionKeys,
    pub(crate) authorizer: Authorizer<B::Permissions>,
    pub(crate) login: LoginService<B::Identity, B::Profiles, B::Accounts, DefaultClock>,
    pub(crate) profiles: ProfileService<B::Profiles, B::Accounts, DefaultClock>,
    pub(crate) lifecycle: ExpenseLifecycleService<
        B::Expenses,
        B::Payments,
        B::Profiles,
        B::Accounts,
        Comments<B>,
        DefaultClock,
    >,
    pub(crate) payments:
        PaymentService<B::Expenses, B::Payments, B::Profiles, B::Accounts, DefaultClock>,
    pub(crate) receipts: ReceiptService<B::Receipts, B::Blobs, B::Expenses, DefaultClock>,
    pub(crate) comments: Arc<Comments<B>>,
}

impl<B: Backend> AppState<B> {
    /// Wires the services over the given adapters.
    #[must_use]
    pub fn new(adapters: Adapters<B>, sessions: SessionKeys, login_frontend_url: &str) -> Self {
        let Adapters {
            expenses,
            payments,
            comments,
            receipts,
            blobs,
            profiles,
            accounts,
            notifier,
            identity,
            permissions,
        } = adapters;
        let clock = Arc::new(DefaultClock);

        let profile_service =
            ProfileService::new(Arc::clone(&profiles), Arc::clone(&accounts), Arc::clone(&clock));
        let projector = ExpenseProjector::new(
            Arc::clone(&expenses),
            payments,
            Arc::clone(&profiles),
            accounts,
        );
        let comment_service = Arc::new(CommentService::new(
            comments,
            Arc::clone(&expenses),
            profiles,
            notifier,
            Arc::clone(&clock),
        ));

        Self {
            sessions,
            authorizer: Authorizer::new(permissions),
            login: LoginService::new(identity, profile_service.clone(), login_frontend_url),
            profiles: profile_service,
            lifecycle: ExpenseLifecycleService::new(
                Arc::clone(&expenses),
                projector.clone(),
                Arc::clone(&comment_service),
                Arc::clone(&clock),
            ),
            payments: PaymentService::new(Arc::clone(&expenses), projector, Arc::clone(&clock)),
            receipts: ReceiptService::new(receipts, blobs, expenses, clock),
            comments: comment_service,
        }
    }
}
