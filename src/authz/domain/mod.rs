//! Domain model for role-based capabilities.
//!
//! Role strings from the permission service are parsed into [`Grants`];
//! an [`Actor`] pairs a username with its grants so services can apply
//! capability rules without touching infrastructure.

mod committee;
mod grants;
mod role;

pub use committee::CommitteeName;
pub use grants::{Actor, Grants};
pub use role::Role;
