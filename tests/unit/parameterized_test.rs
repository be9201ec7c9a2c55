//! Table-driven tests for the small normalizers

use cmmc_query::core::models::{Revision, StatusBucket};
use cmmc_query::core::services::{IdSpelling, derive_control_id};
use test_case::test_case;

#[test_case("met", StatusBucket::Met ; "plain met")]
#[test_case("Implemented", StatusBucket::Met ; "implemented")]
#[test_case("not_met", StatusBucket::NotMet ; "snake case")]
#[test_case("Not Met", StatusBucket::NotMet ; "title case")]
#[test_case("not-met", StatusBucket::NotMet ; "kebab case")]
#[test_case("FAILED", StatusBucket::NotMet ; "failed")]
#[test_case("partially_met", StatusBucket::PartiallyMet ; "partially met")]
#[test_case("partial", StatusBucket::PartiallyMet ; "partial")]
#[test_case("", StatusBucket::NotAssessed ; "empty")]
#[test_case("n/a", StatusBucket::NotAssessed ; "not applicable")]
#[test_case("maybe", StatusBucket::NotAssessed ; "unrecognized")]
fn test_status_normalize(raw: &str, expected: StatusBucket) {
    assert_eq!(StatusBucket::normalize(raw), expected);
}

#[test_case("r2", Revision::R2 ; "r2")]
#[test_case("rev2", Revision::R2 ; "rev2")]
#[test_case("2", Revision::R2 ; "two")]
#[test_case("R3", Revision::R3 ; "upper r3")]
#[test_case("rev3", Revision::R3 ; "rev3")]
#[test_case("3", Revision::R3 ; "three")]
fn test_revision_aliases(raw: &str, expected: Revision) {
    assert_eq!(raw.parse::<Revision>().unwrap(), expected);
}

#[test_case("r1" ; "older revision")]
#[test_case("" ; "empty")]
#[test_case("revision 3" ; "prose")]
fn test_revision_rejects(raw: &str) {
    assert!(raw.parse::<Revision>().is_err());
}

#[test_case("3.1.1[a]", "3.1.1" ; "bracketed letter")]
#[test_case("3.1.1[a][2]", "3.1.1" ; "nested brackets")]
#[test_case("3.1.1a", "3.1.1" ; "trailing letter")]
#[test_case("3.13.11", "3.13.11" ; "bare control")]
#[test_case("03.01.01.a", "03.01.01" ; "rev3 objective")]
#[test_case("AC.L2-3.1.1[b]", "3.1.1" ; "practice prefix")]
#[test_case("  IA.L2-3.5.3  ", "3.5.3" ; "padded practice id")]
fn test_derive_control_id(objective: &str, expected: &str) {
    assert_eq!(derive_control_id(objective), expected);
}

#[test_case(IdSpelling::Bare, "3.1.1", Some("3.1.1") ; "bare")]
#[test_case(IdSpelling::Unprefixed, "AC.L2-3.1.1", Some("3.1.1") ; "unprefixed")]
#[test_case(IdSpelling::Unprefixed, "3.1.1", None ; "unprefixed without prefix")]
#[test_case(IdSpelling::FamilyPrefixed("AC"), "3.1.1", Some("AC.L2-3.1.1") ; "prefixed")]
#[test_case(IdSpelling::FamilyPrefixed("IA"), "AC.L2-3.5.3", Some("IA.L2-3.5.3") ; "reprefixed")]
fn test_id_spelling(spelling: IdSpelling, id: &str, expected: Option<&str>) {
    assert_eq!(spelling.spell(id).as_deref(), expected);
}

