//! Serializable projections of profiles for API consumers.

use super::{BankAccount, BankDetails, Profile, Username};
use serde::Serialize;

/// Nested payout details as exposed to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankInfo {
    /// Member's account number.
    pub bank_account: String,
    /// Clearing number.
    pub sorting_number: String,
    /// Bank name.
    pub bank_name: String,
}

impl From<&BankDetails> for BankInfo {
    fn from(details: &BankDetails) -> Self {
        Self {
            bank_account: details.bank_account().to_owned(),
            sorting_number: details.sorting_number().to_owned(),
            bank_name: details.bank_name().to_owned(),
        }
    }
}

/// Organisation account projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankAccountView {
    /// Account identifier.
    pub id: String,
    /// Account name.
    pub name: String,
}

impl From<&BankAccount> for BankAccountView {
    fn from(account: &BankAccount) -> Self {
        Self {
            id: account.id().to_string(),
            name: account.name().to_owned(),
        }
    }
}

/// Full profile projection shown on a user's own page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Payout details.
    pub bank_info: BankInfo,
    /// Preferred payout account, expanded.
    pub default_account: Option<BankAccountView>,
    /// Push-notification instance identifier.
    pub firebase_instance_id: String,
}

impl ProfileView {
    /// Builds the projection, expanding the default account when supplied.
    #[must_use]
    pub fn new(profile: &Profile, default_account: Option<&BankAccount>) -> Self {
        let identity = profile.identity();
        Self {
            username: identity.username.to_string(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            bank_info: BankInfo::from(profile.bank_details()),
            default_account: default_account.map(BankAccountView::from),
            firebase_instance_id: profile.firebase_instance_id().to_owned(),
        }
    }
}

/// Compact user projection embedded in payments and listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Payout details.
    pub bank_info: BankInfo,
}

impl From<&Profile> for UserSummary {
    fn from(profile: &Profile) -> Self {
        let identity = profile.identity();
        Self {
            username: identity.username.to_string(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            email: identity.email.clone(),
            bank_info: BankInfo::from(profile.bank_details()),
        }
    }
}

impl UserSummary {
    /// Builds a summary for a user without a stored profile.
    #[must_use]
    pub fn bare(username: &Username) -> Self {
        Self {
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            bank_info: BankInfo::from(&BankDetails::default()),
        }
    }
}
