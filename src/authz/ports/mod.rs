//! Port contracts for the permission oracle.

pub mod permission_source;

#[cfg(test)]
pub use permission_source::MockPermissionSource;
pub use permission_source::{PermissionSource, PermissionSourceError, PermissionSourceResult};
