//! Derived expense status and the coarse lifecycle stage.

use super::Verification;
use serde::{Serialize, Serializer};
use std::fmt;

/// Status derived from the combination of attestation, confirmation,
/// reimbursement, and verification, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseStatus {
    /// Booked in the ledger under the verification.
    Booked(Verification),
    /// Reimbursed to the owner.
    Paid,
    /// Attested and confirmed, waiting for payout.
    AwaitingPayment,
    /// Attested but the receipt is not yet in the binder.
    AttestedNotConfirmed,
    /// Receipt in the binder but some part is not attested.
    ConfirmedNotAttested,
    /// Nothing has happened yet.
    NotAttested,
}

impl ExpenseStatus {
    /// Returns the label shown to members.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Booked(verification) => format!("Bokförd som {verification}"),
            Self::Paid => "Utbetald".to_owned(),
            Self::AwaitingPayment => "Inväntar utbetalning".to_owned(),
            Self::AttestedNotConfirmed => "Attesterad men inte i pärmen".to_owned(),
            Self::ConfirmedNotAttested => "Inte attesterad men i pärmen".to_owned(),
            Self::NotAttested => "Inte attesterad".to_owned(),
        }
    }

    /// Returns the coarse lifecycle stage.
    #[must_use]
    pub const fn stage(&self) -> LifecycleStage {
        match self {
            Self::Booked(_) => LifecycleStage::Booked,
            Self::Paid => LifecycleStage::Paid,
            Self::AwaitingPayment => LifecycleStage::Confirmed,
            Self::AttestedNotConfirmed => LifecycleStage::Attested,
            Self::ConfirmedNotAttested | Self::NotAttested => LifecycleStage::Unattested,
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for ExpenseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// Coarse lifecycle stage of an expense.
///
/// Stages only move forward; nothing is rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    /// At least one part lacks attestation.
    Unattested,
    /// Fully attested, not yet confirmed.
    Attested,
    /// Attested and confirmed.
    Confirmed,
    /// Reimbursed.
    Paid,
    /// Booked in the ledger.
    Booked,
}

impl LifecycleStage {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unattested => "unattested",
            Self::Attested => "attested",
            Self::Confirmed => "confirmed",
            Self::Paid => "paid",
            Self::Booked => "booked",
        }
    }
}
