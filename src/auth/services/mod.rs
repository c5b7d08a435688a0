//! Service layer for signing members in.

mod login;

pub use login::{LoginError, LoginResult, LoginService};
