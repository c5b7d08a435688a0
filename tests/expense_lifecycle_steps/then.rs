//! Then steps for expense lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use cashflow::authz::domain::{Actor, Grants};
use cashflow::expense::services::ExpenseServiceError;
use rstest_bdd_macros::then;

#[then(r#"the expense stage is "{stage}""#)]
fn expense_stage_is(world: &LifecycleWorld, stage: String) -> Result<(), eyre::Report> {
    let expense = run_async(world.current_expense())?;
    let actual = serde_json::to_value(expense.stage())?;
    if actual.as_str() != Some(stage.as_str()) {
        return Err(eyre::eyre!("expected stage {stage}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the payment totals "{amount}""#)]
fn payment_totals(world: &LifecycleWorld, amount: String) -> Result<(), eyre::Report> {
    let id = world
        .payment
        .ok_or_else(|| eyre::eyre!("missing payment in scenario world"))?;
    let expense = run_async(world.current_expense())?;
    let receiver = Actor::new(expense.owner().clone(), Grants::default());
    let view = run_async(world.payments.view(&receiver, id))?;
    if view.amount.to_string() != amount {
        return Err(eyre::eyre!("expected total {amount}, found {}", view.amount));
    }
    Ok(())
}

#[then("the operation is forbidden")]
fn operation_is_forbidden(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    match world.last_error.as_ref() {
        Some(ExpenseServiceError::Forbidden { .. }) => Ok(()),
        other => Err(eyre::eyre!("expected Forbidden error, got {other:?}")),
    }
}

#[then("the operation conflicts with the expense stage")]
fn operation_conflicts(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    match world.last_error.as_ref() {
        Some(ExpenseServiceError::Domain(domain)) if domain.is_conflict() => Ok(()),
        other => Err(eyre::eyre!("expected a stage conflict, got {other:?}")),
    }
}
