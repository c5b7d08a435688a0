//! Domain model for member profiles and organisation bank accounts.
//!
//! A profile is attached to every signed-on user and stores what is needed
//! to reimburse them. Usernames are the natural key shared with the
//! permission service and the expense context.

mod bank;
mod error;
mod profile;
mod username;
mod view;

pub use bank::{BankAccount, BankAccountId, BankDetails};
pub use error::ProfileDomainError;
pub use profile::{PersistedProfileData, Profile, UserIdentity};
pub use username::Username;
pub use view::{BankAccountView, BankInfo, ProfileView, UserSummary};
