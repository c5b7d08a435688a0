//! Permission oracle for Cashflow.
//!
//! Role strings are fetched per user from the organisation's permission
//! service and pattern-matched against committee names to compute attest,
//! pay, confirm, and accounting capabilities. The module follows hexagonal
//! architecture:
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
