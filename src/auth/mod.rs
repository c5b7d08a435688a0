//! Single sign-on gateway for Cashflow.
//!
//! Members sign in through the organisation's login service. The service
//! hands back a one-time token which is verified here; a verified identity
//! creates or refreshes the member's profile.

pub mod adapters;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
