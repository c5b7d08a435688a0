//! Expense claims, reimbursements, receipts, and comments for Cashflow.
//!
//! This module implements the expense lifecycle: members submit claims split
//! over budget lines, committee attesters approve each part, treasurers
//! confirm receipts and pay, and accountants book the result. The module
//! follows hexagonal architecture:
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
