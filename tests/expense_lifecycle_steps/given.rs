//! Given steps for expense lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use cashflow::expense::{
    domain::{Amount, BudgetLine},
    services::SubmitExpenseRequest,
};
use chrono::NaiveDate;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a member "{owner}" who submitted an expense of "{amount}" for "{committee}""#)]
fn member_submitted_expense(
    world: &mut LifecycleWorld,
    owner: String,
    amount: String,
    committee: String,
) -> Result<(), eyre::Report> {
    run_async(world.ensure_member(&owner))?;
    let actor = world.actor(&owner)?;
    let expense_date = NaiveDate::from_ymd_opt(2024, 3, 14)
        .ok_or_else(|| eyre::eyre!("invalid fixed expense date"))?;
    let request = SubmitExpenseRequest::new("Fika till mötet", expense_date).with_part(
        BudgetLine::named(committee, "Verksamhet", "Fika"),
        Amount::parse(&amount)?,
    );
    let created = run_async(world.lifecycle.submit(&actor, request))
        .wrap_err("submit expense in scenario setup")?;
    world.expense = Some(created.id());
    Ok(())
}

#[given(r#""{member}" holds the roles "{roles}""#)]
fn member_holds_roles(
    world: &mut LifecycleWorld,
    member: String,
    roles: String,
) -> Result<(), eyre::Report> {
    run_async(world.ensure_member(&member))?;
    let parsed = roles
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_owned)
        .collect();
    world.roles.insert(member, parsed);
    Ok(())
}
