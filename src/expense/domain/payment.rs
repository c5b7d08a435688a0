//! Reimbursement payments from an organisation account to a member.

use super::PaymentId;
use crate::profile::domain::{BankAccountId, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const TAG_PREFIX: &str = "Data";
const TAG_ID_LENGTH: usize = 8;

/// A transfer that reimburses one or more expenses of a single member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    paid_at: DateTime<Utc>,
    payer: Username,
    receiver: Username,
    account: BankAccountId,
}

/// Parameter object for reconstructing a persisted payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPaymentData {
    /// Persisted payment identifier.
    pub id: PaymentId,
    /// Persisted payout time.
    pub paid_at: DateTime<Utc>,
    /// Persisted treasurer.
    pub payer: Username,
    /// Persisted member reimbursed.
    pub receiver: Username,
    /// Persisted source account.
    pub account: BankAccountId,
}

impl Payment {
    /// Records a payment made now.
    #[must_use]
    pub fn new(
        payer: Username,
        receiver: Username,
        account: BankAccountId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            paid_at: clock.utc(),
            payer,
            receiver,
            account,
        }
    }

    /// Reconstructs a payment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPaymentData) -> Self {
        Self {
            id: data.id,
            paid_at: data.paid_at,
            payer: data.payer,
            receiver: data.receiver,
            account: data.account,
        }
    }

    /// Returns the payment identifier.
    #[must_use]
    pub const fn id(&self) -> PaymentId {
        self.id
    }

    /// Returns the payout time.
    #[must_use]
    pub const fn paid_at(&self) -> DateTime<Utc> {
        self.paid_at
    }

    /// Returns the treasurer who made the transfer.
    #[must_use]
    pub const fn payer(&self) -> &Username {
        &self.payer
    }

    /// Returns the member reimbursed.
    #[must_use]
    pub const fn receiver(&self) -> &Username {
        &self.receiver
    }

    /// Returns the organisation account the money left.
    #[must_use]
    pub const fn account(&self) -> BankAccountId {
        self.account
    }

    /// Returns the reference written on the bank transfer, e.g.
    /// `"Data1a2b3c4d"`.
    #[must_use]
    pub fn tag(&self) -> String {
        let short: String = self
            .id
            .into_inner()
            .simple()
            .to_string()
            .chars()
            .take(TAG_ID_LENGTH)
            .collect();
        format!("{TAG_PREFIX}{short}")
    }
}
