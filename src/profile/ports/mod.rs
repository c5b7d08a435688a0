//! Port contracts for profile management.

pub mod repository;

pub use repository::{
    BankAccountRepository, ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult,
};
