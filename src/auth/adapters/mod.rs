//! Adapter implementations for the identity provider port.

pub mod http;
pub mod memory;
