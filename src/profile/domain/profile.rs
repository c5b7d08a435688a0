//! Profile aggregate root and the identity it is attached to.

use super::{BankAccountId, BankDetails, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Identity attributes delivered by the single sign-on service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Login name.
    pub username: Username,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email used for notifications.
    pub email: String,
}

impl UserIdentity {
    /// Creates an identity from its parts.
    #[must_use]
    pub fn new(
        username: Username,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// Member profile: identity plus the information needed to reimburse them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    identity: UserIdentity,
    bank_details: BankDetails,
    default_account: Option<BankAccountId>,
    firebase_instance_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Persisted identity attributes.
    pub identity: UserIdentity,
    /// Persisted payout details.
    pub bank_details: BankDetails,
    /// Persisted default organisation account.
    pub default_account: Option<BankAccountId>,
    /// Persisted push-notification instance identifier.
    pub firebase_instance_id: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a profile with empty bank details for a new user.
    #[must_use]
    pub fn new(identity: UserIdentity, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            identity,
            bank_details: BankDetails::default(),
            default_account: None,
            firebase_instance_id: String::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            identity: data.identity,
            bank_details: data.bank_details,
            default_account: data.default_account,
            firebase_instance_id: data.firebase_instance_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the profile's username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.identity.username
    }

    /// Returns the identity attributes.
    #[must_use]
    pub const fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    /// Returns the payout details.
    #[must_use]
    pub const fn bank_details(&self) -> &BankDetails {
        &self.bank_details
    }

    /// Returns the preferred organisation account for payouts, if any.
    #[must_use]
    pub const fn default_account(&self) -> Option<BankAccountId> {
        self.default_account
    }

    /// Returns the push-notification instance identifier.
    #[must_use]
    pub fn firebase_instance_id(&self) -> &str {
        &self.firebase_instance_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `"First Last"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.identity.first_name, self.identity.last_name)
    }

    /// Replaces names and email with the latest values from sign-on.
    ///
    /// The username is never changed.
    pub fn refresh_identity(&mut self, identity: UserIdentity, clock: &impl Clock) {
        let UserIdentity {
            first_name,
            last_name,
            email,
            ..
        } = identity;
        self.identity.first_name = first_name;
        self.identity.last_name = last_name;
        self.identity.email = email;
        self.touch(clock);
    }

    /// Replaces the payout details and default account.
    pub fn update_bank_details(
        &mut self,
        details: BankDetails,
        default_account: Option<BankAccountId>,
        clock: &impl Clock,
    ) {
        self.bank_details = details;
        self.default_account = default_account;
        self.touch(clock);
    }

    /// Records the push-notification instance identifier.
    pub fn set_firebase_instance_id(&mut self, instance_id: impl Into<String>, clock: &impl Clock) {
        self.firebase_instance_id = instance_id.into();
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
