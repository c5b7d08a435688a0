//! Role strings returned by the permission service.

use super::CommitteeName;

const ATTEST_PREFIX: &str = "attest-";
const ACCOUNTING_PREFIX: &str = "accounting-";
const WILDCARD: &str = "*";

/// A single parsed role grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// `attest-<committee>`: may attest parts charged to the committee.
    Attest(CommitteeName),
    /// `accounting-<committee>`: may book expenses of the committee.
    Accounting(CommitteeName),
    /// `accounting-*` or `*`: may book any expense.
    AccountingWildcard,
    /// `pay`: may pay out reimbursements.
    Pay,
    /// `confirm`: may confirm that receipts are filed.
    Confirm,
    /// Any role this application does not interpret.
    Other(String),
}

impl Role {
    /// Parses a raw role string.
    ///
    /// Prefix matching is case-sensitive as delivered by the permission
    /// service; the committee part is normalised.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == WILDCARD {
            return Self::AccountingWildcard;
        }
        if trimmed == "pay" {
            return Self::Pay;
        }
        if trimmed == "confirm" {
            return Self::Confirm;
        }
        if let Some(committee) = trimmed.strip_prefix(ATTEST_PREFIX) {
            return CommitteeName::parse(committee)
                .map_or_else(|| Self::Other(trimmed.to_owned()), Self::Attest);
        }
        if let Some(committee) = trimmed.strip_prefix(ACCOUNTING_PREFIX) {
            if committee.trim() == WILDCARD {
                return Self::AccountingWildcard;
            }
            return CommitteeName::parse(committee)
                .map_or_else(|| Self::Other(trimmed.to_owned()), Self::Accounting);
        }
        Self::Other(trimmed.to_owned())
    }
}
