//! Service layer for profile management.

mod directory;

pub use directory::{
    ProfileService, ProfileServiceError, ProfileServiceResult, UpdateBankDetailsRequest,
};
