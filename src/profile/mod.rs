//! Member profiles and organisation bank accounts for Cashflow.
//!
//! Every user who signs on gets a profile holding their payout details. The
//! organisation's own bank accounts, from which reimbursements are paid, are
//! managed here as well. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
