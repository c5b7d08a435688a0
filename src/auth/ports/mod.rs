//! Port contracts for identity verification.

pub mod identity_provider;

#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError, IdentityProviderResult};
