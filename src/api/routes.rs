//! Route table.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use super::handlers::{auth, expenses, files, payments, queues, users};
use super::{AppState, Backend};

/// Builds the application router over shared state.
pub fn router<B: Backend>(state: Arc<AppState<B>>) -> Router {
    Router::new()
        .route("/login", get(auth::login::<B>))
        .route("/login/:token", get(auth::exchange::<B>))
        .route("/logout", post(auth::logout))
        .route("/api/health", get(auth::health))
        .route(
            "/api/expenses",
            get(expenses::list::<B>).post(expenses::create::<B>),
        )
        .route(
            "/api/expenses/:id",
            get(expenses::show::<B>).delete(expenses::delete::<B>),
        )
        .route("/api/expenses/:id/confirm", post(expenses::confirm::<B>))
        .route("/api/expenses/:id/book", post(expenses::book::<B>))
        .route(
            "/api/expenses/:id/comments",
            get(expenses::comments::<B>).post(expenses::comment::<B>),
        )
        .route("/api/expenses/:id/files", get(expenses::receipts::<B>))
        .route("/api/parts/:id/attest", post(expenses::attest::<B>))
        .route("/api/queues/attest", get(queues::attest::<B>))
        .route("/api/queues/confirm", get(queues::confirm::<B>))
        .route("/api/queues/pay", get(queues::pay::<B>))
        .route("/api/queues/account", get(queues::account::<B>))
        .route("/api/payments", post(payments::create::<B>))
        .route("/api/payments/:id", get(payments::show::<B>))
        .route("/api/files", post(files::upload::<B>))
        .route("/api/files/:id/delete", post(files::remove::<B>))
        .route("/receipts/:key", get(files::content::<B>))
        .route("/api/me", get(users::me::<B>))
        .route("/api/me/device", post(users::register_device::<B>))
        .route(
            "/api/users/:username",
            get(users::show::<B>).put(users::update::<B>),
        )
        .route("/api/users/:username/receipts", get(users::receipts::<B>))
        .route(
            "/api/accounts",
            get(users::accounts::<B>).post(users::create_account::<B>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
