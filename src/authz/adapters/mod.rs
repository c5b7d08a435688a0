//! Adapter implementations for the permission source port.

pub mod http;
pub mod memory;
