//! Cashflow: expense reimbursement for a student chapter.
//!
//! Members file expenses split into budget-line parts and attach receipts.
//! Committee attesters approve parts, treasurers confirm filed receipts,
//! book verifications and pay out grouped reimbursements to each member's
//! bank account.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, web
//!   services, filesystem)
//!
//! # Modules
//!
//! - [`profile`]: Member profiles, bank details, and organisation accounts
//! - [`authz`]: Role grants from the permission service
//! - [`expense`]: Expenses, receipts, comments, and payments
//! - [`auth`]: Sign-on through the login service
//! - [`api`]: The JSON HTTP surface
//! - [`config`]: Environment configuration
//! - [`telemetry`]: Structured logging setup

pub mod api;
pub mod auth;
pub mod authz;
pub mod config;
pub mod expense;
pub mod profile;
pub mod telemetry;
