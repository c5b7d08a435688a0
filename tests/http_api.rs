//! HTTP API integration tests over in-memory adapters.
//!
//! Tests are organized into modules by functionality:
//! - `auth_tests`: Sign-on, session tokens, and the health check
//! - `expense_flow_tests`: Submission through attestation, payout, and booking
//! - `receipt_tests`: Upload, download, and detachment of receipt files

mod http_api {
    pub mod harness;

    mod auth_tests;
    mod expense_flow_tests;
    mod receipt_tests;
}
