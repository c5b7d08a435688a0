//! Maps service errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use super::session::SessionError;
use crate::auth::services::LoginError;
use crate::authz::services::AuthorizerError;
use crate::expense::{
    ports::{ExpenseRepositoryError, ReceiptStoreError},
    services::ExpenseServiceError,
};
use crate::profile::{ports::ProfileRepositoryError, services::ProfileServiceError};

/// Error returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid session accompanied the request.
    #[error("not signed in")]
    Unauthenticated,
    /// The request was malformed.
    #[error("{0}")]
    BadRequest(String),
    /// The member lacks the capability.
    #[error("{0}")]
    Forbidden(String),
    /// The resource does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The resource is in the wrong state for the request.
    #[error("{0}")]
    Conflict(String),
    /// Something failed on the server side.
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Returns the HTTP status for the error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn internal(err: &impl std::error::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::Internal("internal server error".to_owned())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { message: self.to_string() })).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        tracing::debug!(error = %err, "rejected session");
        Self::Unauthenticated
    }
}

impl From<AuthorizerError> for ApiError {
    fn from(err: AuthorizerError) -> Self {
        match err {
            AuthorizerError::Domain(domain) => Self::BadRequest(domain.to_string()),
            AuthorizerError::Source(source) => Self::internal(&source),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::Provider(provider) => Self::internal(&provider),
            LoginError::Profile(profile) => profile.into(),
        }
    }
}

impl From<ProfileRepositoryError> for ApiError {
    fn from(err: ProfileRepositoryError) -> Self {
        match err {
            ProfileRepositoryError::NotFound(_) => Self::NotFound(err.to_string()),
            ProfileRepositoryError::DuplicateProfile(_)
            | ProfileRepositoryError::DuplicateBankAccount(_) => Self::Conflict(err.to_string()),
            ProfileRepositoryError::Persistence(_) => Self::internal(&err),
        }
    }
}

impl From<ProfileServiceError> for ApiError {
    fn from(err: ProfileServiceError) -> Self {
        match err {
            ProfileServiceError::Domain(_) | ProfileServiceError::UnknownBankAccount(_) => {
                Self::BadRequest(err.to_string())
            }
            ProfileServiceError::Repository(repository) => repository.into(),
            ProfileServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            ProfileServiceError::Forbidden { .. } => Self::Forbidden(err.to_string()),
        }
    }
}

impl From<ExpenseRepositoryError> for ApiError {
    fn from(err: ExpenseRepositoryError) -> Self {
        match err {
            ExpenseRepositoryError::ExpenseNotFound(_)
            | ExpenseRepositoryError::ReceiptNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ExpenseRepositoryError::DuplicateExpense(_)
            | ExpenseRepositoryError::DuplicatePayment(_)
            | ExpenseRepositoryError::DuplicateComment(_)
            | ExpenseRepositoryError::DuplicateReceipt(_) => Self::Conflict(err.to_string()),
            ExpenseRepositoryError::Persistence(_) => Self::internal(&err),
        }
    }
}

impl From<ReceiptStoreError> for ApiError {
    fn from(err: ReceiptStoreError) -> Self {
        match err {
            ReceiptStoreError::NotFound(_) | ReceiptStoreError::InvalidKey(_) => {
                Self::NotFound(err.to_string())
            }
            ReceiptStoreError::Io(_) => Self::internal(&err),
        }
    }
}

impl From<ExpenseServiceError> for ApiError {
    fn from(err: ExpenseServiceError) -> Self {
        match err {
            ExpenseServiceError::Domain(ref domain) if domain.is_conflict() => {
                Self::Conflict(err.to_string())
            }
            ExpenseServiceError::Domain(_)
            | ExpenseServiceError::UnknownBankAccount(_)
            | ExpenseServiceError::ReceiverMismatch { .. }
            | ExpenseServiceError::NothingToPay
            | ExpenseServiceError::NoFiles => Self::BadRequest(err.to_string()),
            ExpenseServiceError::Repository(repository) => repository.into(),
            ExpenseServiceError::Profiles(profiles) => profiles.into(),
            ExpenseServiceError::Store(store) => store.into(),
            ExpenseServiceError::ExpenseNotFound(_)
            | ExpenseServiceError::PartNotFound(_)
            | ExpenseServiceError::PaymentNotFound(_)
            | ExpenseServiceError::ReceiptNotFound(_)
            | ExpenseServiceError::UnknownUser(_) => Self::NotFound(err.to_string()),
            ExpenseServiceError::Forbidden { .. } => Self::Forbidden(err.to_string()),
        }
    }
}
