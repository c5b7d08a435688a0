//! When steps for expense lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use cashflow::expense::services::PayRequest;
use cashflow::profile::{domain::BankAccount, ports::BankAccountRepository};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{member}" attests every part"#)]
fn attests_every_part(world: &mut LifecycleWorld, member: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&member)?;
    let expense = run_async(world.current_expense())?;
    for part in expense.parts() {
        let result = run_async(world.lifecycle.attest_part(&actor, part.id()));
        if world.record(result).is_none() {
            break;
        }
    }
    Ok(())
}

#[when(r#""{member}" confirms the expense"#)]
fn confirms_expense(world: &mut LifecycleWorld, member: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&member)?;
    let id = run_async(world.current_expense())?.id();
    let result = run_async(world.lifecycle.confirm(&actor, id));
    world.record(result);
    Ok(())
}

#[when(r#""{member}" pays the expense from account "{account}""#)]
fn pays_expense(
    world: &mut LifecycleWorld,
    member: String,
    account: String,
) -> Result<(), eyre::Report> {
    let actor = world.actor(&member)?;
    let expense = run_async(world.current_expense())?;
    let bank_account = BankAccount::new(account)?;
    run_async(world.accounts.store(&bank_account)).wrap_err("store bank account")?;

    let request = PayRequest::new(expense.owner().clone(), bank_account.id(), [expense.id()]);
    let result = run_async(world.payments.pay(&actor, request));
    if let Some(payment) = world.record(result) {
        world.payment = Some(payment.id());
    }
    Ok(())
}

#[when(r#""{member}" books the expense as "{verification}""#)]
fn books_expense(
    world: &mut LifecycleWorld,
    member: String,
    verification: String,
) -> Result<(), eyre::Report> {
    let actor = world.actor(&member)?;
    let id = run_async(world.current_expense())?.id();
    let result = run_async(world.lifecycle.book(&actor, id, &verification));
    world.record(result);
    Ok(())
}
