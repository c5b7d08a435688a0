//! JSON HTTP surface for Cashflow.
//!
//! Members authenticate through the login service and then present a signed
//! bearer token. Each request resolves the member's grants from the
//! permission service before the expense services run.

pub mod backends;
mod error;
pub mod handlers;
mod routes;
pub mod session;
mod state;

pub use error::ApiError;
pub use routes::router;
pub use session::{CurrentActor, IssuedSession, SessionError, SessionKeys};
pub use state::{Adapters, AppState, Backend};
