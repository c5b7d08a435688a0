//! Profile and bank account persistence against `PostgreSQL`.

use super::helpers::TestDatabase;
use cashflow::profile::domain::{BankAccount, BankDetails};
use cashflow::profile::ports::{BankAccountRepository, ProfileRepository, ProfileRepositoryError};
use eyre::OptionExt;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bank_details_and_default_account_round_trip() -> eyre::Result<()> {
    let Some(db) = TestDatabase::create().await? else {
        return Ok(());
    };
    let account = BankAccount::new("Huvudkonto")?;
    BankAccountRepository::store(&db.profiles, &account).await?;
    let mut alice = db.member("alice").await?;
    let details = BankDetails::new("1234567", "8327", "Swedbank")?;

    alice.update_bank_details(details.clone(), Some(account.id()), &DefaultClock);
    ProfileRepository::update(&db.profiles, &alice).await?;
    let found = db
        .profiles
        .find_by_username(alice.username())
        .await?
        .ok_or_eyre("stored profile is missing")?;

    assert_eq!(found.bank_details(), &details);
    assert_eq!(found.default_account(), Some(account.id()));
    assert_eq!(found.identity(), alice.identity());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_profiles_are_rejected() -> eyre::Result<()> {
    let Some(db) = TestDatabase::create().await? else {
        return Ok(());
    };
    let alice = db.member("alice").await?;

    let again = ProfileRepository::store(&db.profiles, &alice).await;

    assert!(matches!(
        again,
        Err(ProfileRepositoryError::DuplicateProfile(name)) if &name == alice.username()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bank_accounts_are_listed_and_found() -> eyre::Result<()> {
    let Some(db) = TestDatabase::create().await? else {
        return Ok(());
    };
    let main = BankAccount::new("Huvudkonto")?;
    let cafe = BankAccount::new("Caféts konto")?;
    for account in [&main, &cafe] {
        BankAccountRepository::store(&db.profiles, account).await?;
    }

    let listed = BankAccountRepository::list_all(&db.profiles).await?;
    let found = db.profiles.find_by_id(cafe.id()).await?;

    assert_eq!(listed.len(), 2);
    assert_eq!(found.as_ref().map(BankAccount::name), Some("Caféts konto"));
    Ok(())
}
