//! Capabilities resolved from a user's roles, and the acting user.

use super::{CommitteeName, Role};
use crate::profile::domain::Username;
use serde::Serialize;
use std::collections::BTreeSet;

/// Committee whose attesters are the organisation's authorised signatories.
const SIGNATORY_COMMITTEE: &str = "firmatecknare";

/// Capabilities granted to a user by the permission service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Grants {
    attest: BTreeSet<CommitteeName>,
    accounting: BTreeSet<CommitteeName>,
    accounting_wildcard: bool,
    pay: bool,
    confirm: bool,
}

impl Grants {
    /// Builds grants from raw role strings.
    #[must_use]
    pub fn from_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut grants = Self::default();
        for raw in roles {
            match Role::parse(raw.as_ref()) {
                Role::Attest(committee) => {
                    grants.attest.insert(committee);
                }
                Role::Accounting(committee) => {
                    grants.accounting.insert(committee);
                }
                Role::AccountingWildcard => grants.accounting_wildcard = true,
                Role::Pay => grants.pay = true,
                Role::Confirm => grants.confirm = true,
                Role::Other(_) => {}
            }
        }
        grants
    }

    /// Returns the committees whose parts the user may attest.
    #[must_use]
    pub const fn attestable_committees(&self) -> &BTreeSet<CommitteeName> {
        &self.attest
    }

    /// Returns `true` when the user may attest parts of the committee.
    #[must_use]
    pub fn may_attest_committee(&self, committee: &CommitteeName) -> bool {
        self.attest.contains(committee)
    }

    /// Returns the committees whose expenses the user may book.
    #[must_use]
    pub const fn accountable_committees(&self) -> &BTreeSet<CommitteeName> {
        &self.accounting
    }

    /// Returns `true` when the user may book expenses of any committee.
    #[must_use]
    pub const fn has_accounting_wildcard(&self) -> bool {
        self.accounting_wildcard
    }

    /// Returns `true` when the user may book expenses of the committee.
    #[must_use]
    pub fn may_account_committee(&self, committee: &CommitteeName) -> bool {
        self.accounting_wildcard || self.accounting.contains(committee)
    }

    /// Returns `true` when the committee is named by an `accounting-` role.
    ///
    /// Unlike [`Self::may_account_committee`] the wildcard is ignored.
    #[must_use]
    pub fn accounts_for_committee(&self, committee: &CommitteeName) -> bool {
        self.accounting.contains(committee)
    }

    /// Returns `true` when the user may pay out reimbursements.
    #[must_use]
    pub const fn may_pay(&self) -> bool {
        self.pay
    }

    /// Returns `true` when the user may confirm filed receipts.
    #[must_use]
    pub const fn may_confirm(&self) -> bool {
        self.confirm
    }

    /// Returns `true` for authorised signatories, who may delete any unpaid
    /// expense.
    #[must_use]
    pub fn is_signatory(&self) -> bool {
        self.attest
            .iter()
            .any(|committee| committee.as_str() == SIGNATORY_COMMITTEE)
    }

    /// Returns `true` when the user holds any administrative capability.
    ///
    /// The accounting wildcard alone does not count; it only lets the user
    /// book expenses.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        !self.attest.is_empty() || self.pay || self.confirm || !self.accounting.is_empty()
    }
}

/// The signed-on user performing an operation, with resolved grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    username: Username,
    grants: Grants,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(username: Username, grants: Grants) -> Self {
        Self { username, grants }
    }

    /// Returns the actor's username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the actor's grants.
    #[must_use]
    pub const fn grants(&self) -> &Grants {
        &self.grants
    }

    /// Returns `true` when the actor is the given user.
    #[must_use]
    pub fn is(&self, username: &Username) -> bool {
        self.username == *username
    }

    /// Returns `true` when the actor may see the profile of `owner`.
    ///
    /// Users see their own profile; administrators see everyone's.
    #[must_use]
    pub fn may_view_profile(&self, owner: &Username) -> bool {
        self.is(owner) || self.grants.is_admin()
    }
}
