//! Application services for resolving actors.

mod authorizer;

pub use authorizer::{Authorizer, AuthorizerError, AuthorizerResult};
