//! Capability rules relating members and officers to expenses.

use super::support::{actor, expense};
use crate::expense::domain::{PaymentId, policy};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case(&["attest-cafe"], true)]
#[case(&["attest-CAFE"], true)]
#[case(&["attest-dsek"], false)]
#[case(&["pay"], false)]
fn attesters_match_the_part_committee(#[case] roles: &[&str], #[case] expected: bool) {
    let claim = expense("alice", &["Cafe"]);
    let part = claim.parts().first().expect("one part");
    assert_eq!(policy::may_attest_part_of(&actor("bob", roles), &claim, part), expected);
}

#[rstest]
fn owners_never_attest_their_own_parts() {
    let claim = expense("alice", &["cafe"]);
    let part = claim.parts().first().expect("one part");
    let owner = actor("alice", &["attest-cafe"]);

    assert!(policy::may_attest_part(&owner, part));
    assert!(!policy::may_attest_part_of(&owner, &claim, part));
    assert!(!policy::awaits_attest_by(&owner, &claim));
}

#[rstest]
fn attest_queue_skips_attested_parts() {
    let mut claim = expense("alice", &["cafe"]);
    let attester = actor("bob", &["attest-cafe"]);
    assert!(policy::awaits_attest_by(&attester, &claim));

    let part_id = claim.parts().first().expect("one part").id();
    claim
        .attest_part(part_id, attester.username().clone(), &DefaultClock)
        .expect("attest succeeds");

    assert!(!policy::awaits_attest_by(&attester, &claim));
}

#[rstest]
#[case(&["accounting-cafe"], true)]
#[case(&["accounting-*"], true)]
#[case(&["*"], true)]
#[case(&["accounting-dsek"], false)]
#[case(&["attest-cafe"], false)]
fn accountants_match_committee_or_wildcard(#[case] roles: &[&str], #[case] expected: bool) {
    let claim = expense("alice", &["cafe"]);
    assert_eq!(policy::may_account(&actor("acc", roles), &claim), expected);
}

#[rstest]
#[case("alice", &[], true)]
#[case("bob", &["attest-cafe"], true)]
#[case("sig", &["attest-firmatecknare"], true)]
#[case("mallory", &["pay", "confirm"], false)]
fn unpaid_expenses_are_deletable_by_owner_attesters_and_signatories(
    #[case] who: &str,
    #[case] roles: &[&str],
    #[case] expected: bool,
) {
    let claim = expense("alice", &["cafe"]);
    assert_eq!(policy::may_delete(&actor(who, roles), &claim), expected);
}

#[rstest]
fn paid_expenses_are_never_deletable() {
    let clock = DefaultClock;
    let mut claim = expense("alice", &["cafe"]);
    let part_id = claim.parts().first().expect("one part").id();
    claim
        .attest_part(part_id, actor("bob", &[]).username().clone(), &clock)
        .expect("attest succeeds");
    claim
        .confirm(actor("tess", &[]).username().clone(), &clock)
        .expect("confirm succeeds");
    claim
        .mark_paid(PaymentId::new(), &clock)
        .expect("payment succeeds");

    assert!(!policy::may_delete(&actor("alice", &[]), &claim));
    assert!(!policy::may_delete(&actor("sig", &["attest-firmatecknare"]), &claim));
}

#[rstest]
#[case("alice", &[], true)]
#[case("tess", &["pay"], true)]
#[case("bob", &["attest-cafe"], true)]
#[case("acc", &["accounting-cafe"], true)]
#[case("any", &["accounting-*"], false)]
#[case("root", &["*"], false)]
#[case("eve", &["attest-dsek"], false)]
#[case("mallory", &[], false)]
fn visibility_follows_ownership_and_roles(
    #[case] who: &str,
    #[case] roles: &[&str],
    #[case] expected: bool,
) {
    let claim = expense("alice", &["cafe"]);
    assert_eq!(policy::may_view(&actor(who, roles), &claim), expected);
}
