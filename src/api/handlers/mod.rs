//! Request handlers grouped by resource.

pub mod auth;
pub mod expenses;
pub mod files;
pub mod payments;
pub mod queues;
pub mod users;

use super::ApiError;
use crate::profile::domain::Username;

fn parse_username(raw: &str) -> Result<Username, ApiError> {
    Username::new(raw).map_err(|err| ApiError::BadRequest(err.to_string()))
}
