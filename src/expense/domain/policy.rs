//! Capability rules relating an actor to expenses.

use super::{Expense, ExpensePart};
use crate::authz::domain::Actor;

/// Returns `true` when the actor may attest the part.
#[must_use]
pub fn may_attest_part(actor: &Actor, part: &ExpensePart) -> bool {
    part.committee()
        .is_some_and(|committee| actor.grants().may_attest_committee(&committee))
}

/// Returns `true` when the actor may attest the part on this expense.
///
/// Owners never attest their own claims.
#[must_use]
pub fn may_attest_part_of(actor: &Actor, expense: &Expense, part: &ExpensePart) -> bool {
    !actor.is(expense.owner()) && may_attest_part(actor, part)
}

/// Returns `true` when the expense belongs in the actor's attest queue.
#[must_use]
pub fn awaits_attest_by(actor: &Actor, expense: &Expense) -> bool {
    !actor.is(expense.owner())
        && expense
            .parts()
            .iter()
            .any(|part| !part.is_attested() && may_attest_part(actor, part))
}

/// Returns `true` when the actor may book the expense.
#[must_use]
pub fn may_account(actor: &Actor, expense: &Expense) -> bool {
    let grants = actor.grants();
    grants.has_accounting_wildcard()
        || expense
            .committee_keys()
            .iter()
            .any(|committee| grants.may_account_committee(committee))
}

/// Returns `true` when the actor may delete the expense.
///
/// Reimbursed expenses are never deleted. Signatories, the owner, and anyone
/// who may attest one of its parts may delete the rest.
#[must_use]
pub fn may_delete(actor: &Actor, expense: &Expense) -> bool {
    if expense.is_reimbursed() {
        return false;
    }
    actor.grants().is_signatory()
        || actor.is(expense.owner())
        || expense
            .parts()
            .iter()
            .any(|part| may_attest_part(actor, part))
}

/// Returns `true` when the actor may see the expense.
///
/// The accounting wildcard books any expense but does not widen visibility.
#[must_use]
pub fn may_view(actor: &Actor, expense: &Expense) -> bool {
    let grants = actor.grants();
    if actor.is(expense.owner()) || grants.may_pay() {
        return true;
    }
    expense.committee_keys().iter().any(|committee| {
        grants.accounts_for_committee(committee) || grants.may_attest_committee(committee)
    })
}
