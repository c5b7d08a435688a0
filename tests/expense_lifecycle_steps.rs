//! Behaviour tests for the expense reimbursement lifecycle.

#[path = "expense_lifecycle_steps/mod.rs"]
mod expense_lifecycle_steps_defs;

use expense_lifecycle_steps_defs::world::{LifecycleWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/expense_lifecycle.feature",
    name = "An attested and confirmed expense is paid out"
)]
#[tokio::test(flavor = "multi_thread")]
async fn attested_and_confirmed_expense_is_paid(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/expense_lifecycle.feature",
    name = "An owner cannot attest their own expense"
)]
#[tokio::test(flavor = "multi_thread")]
async fn owner_cannot_attest_own_expense(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/expense_lifecycle.feature",
    name = "An unconfirmed expense cannot be paid"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unconfirmed_expense_cannot_be_paid(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/expense_lifecycle.feature",
    name = "A paid expense is booked by accounting"
)]
#[tokio::test(flavor = "multi_thread")]
async fn paid_expense_is_booked(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/expense_lifecycle.feature",
    name = "Accounting for another committee cannot book"
)]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_accounting_cannot_book(world: LifecycleWorld) {
    let _ = world;
}
