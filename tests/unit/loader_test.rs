//! Tests for loading and merging catalog sources

use cmmc_query::adapters::toml::{LoadError, discover_sources, parse_source};
use cmmc_query::core::models::Revision;

use crate::common::{SourceDir, shipped_catalog, shipped_data_dir};

const AC_FAMILY: &str = r#"
[[families_r2]]
id = "3.1"
name = "Access Control"

[[families_r2.controls]]
id = "3.1.1"
name = "Authorized Access Control"
objectives = [
    { id = "3.1.1[a]", text = "authorized users are identified." },
    { id = "3.1.1[b]", text = "processes acting on behalf of authorized users are identified." },
]
"#;

const AC_FAMILY_AGAIN: &str = r#"
[[families_r2]]
id = "3.1-duplicate"
name = "Access Control (second copy)"

[[families_r2.controls]]
id = "3.1.1"
name = "Shadowed Definition"
"#;

// =============================================================================
// SHIPPED DATA
// =============================================================================

#[test]
fn test_shipped_sources_all_load() {
    let catalog = shipped_catalog();
    let report = catalog.report();
    assert!(report.rejected.is_empty(), "rejected: {:?}", report.rejected);
    assert_eq!(report.loaded.len(), discover_sources(&shipped_data_dir()).len());
}

#[test]
fn test_shipped_stats() {
    let catalog = shipped_catalog();
    let r2 = catalog.index(Revision::R2).stats();
    assert_eq!(r2.families, 7);
    assert_eq!(r2.controls, 12);
    assert_eq!(r2.objectives, 41);

    let r3 = catalog.index(Revision::R3).stats();
    assert_eq!(r3.families, 4);
    assert_eq!(r3.controls, 5);
    assert_eq!(r3.objectives, 9);
}

#[test]
fn test_family_counts_sum_to_stats() {
    let catalog = shipped_catalog();
    for revision in Revision::ALL {
        let index = catalog.index(revision);
        let controls: usize = index.families().iter().map(|f| f.control_count).sum();
        let objectives: usize = index.families().iter().map(|f| f.objective_count).sum();
        assert_eq!(controls, index.stats().controls);
        assert_eq!(objectives, index.stats().objectives);
    }
}

// =============================================================================
// MERGING
// =============================================================================

#[test]
fn test_duplicate_control_keeps_first_definition() {
    let sources = SourceDir::new();
    sources.add("a.toml", AC_FAMILY);
    sources.add("b.toml", AC_FAMILY_AGAIN);

    let catalog = sources.catalog();
    let index = catalog.index(Revision::R2);
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("3.1.1").unwrap().control_name, "Authorized Access Control");
    assert_eq!(index.get("3.1.1").unwrap().objectives.len(), 2);
}

#[test]
fn test_invalid_file_is_skipped_not_fatal() {
    let sources = SourceDir::new();
    sources.add("a.toml", AC_FAMILY);
    let bad = sources.add("b.toml", "[[families_r2]]\nid = \"3.2\"\nnmae = \"typo\"\n");

    let catalog = sources.catalog();
    assert_eq!(catalog.index(Revision::R2).len(), 1);
    assert_eq!(catalog.report().rejected.len(), 1);
    assert_eq!(catalog.report().rejected[0].path, bad);
}

#[test]
fn test_discover_recurses_in_sorted_order() {
    let sources = SourceDir::new();
    sources.add("20-b.toml", "");
    sources.add("10-a.toml", "");
    sources.add("nested/30-c.toml", "");
    sources.add("README.md", "# not a source");

    let names: Vec<String> = discover_sources(sources.path())
        .iter()
        .map(|p| p.strip_prefix(sources.path()).unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["10-a.toml", "20-b.toml", "nested/30-c.toml"]);
}

#[test]
fn test_empty_directory_gives_empty_catalog() {
    let sources = SourceDir::new();
    let catalog = sources.catalog();
    assert!(catalog.index(Revision::R2).is_empty());
    assert!(catalog.index(Revision::R3).is_empty());
    assert!(catalog.guidance().is_empty());
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_repeated_objective_is_invalid() {
    let source = r#"
[[families_r2]]
id = "3.1"
name = "Access Control"

[[families_r2.controls]]
id = "3.1.1"
name = "Authorized Access Control"
objectives = [
    { id = "3.1.1[a]", text = "one" },
    { id = "3.1.1[a]", text = "two" },
]
"#;
    assert!(matches!(parse_source(source), Err(LoadError::Invalid(_))));
}

#[test]
fn test_unknown_change_type_is_a_parse_error() {
    let source = "[crosswalk.\"3.1.1\"]\ntarget = \"03.01.01\"\nchange = \"rewritten\"\n";
    assert!(matches!(parse_source(source), Err(LoadError::Parse(_))));
}

#[test]
fn test_control_without_objectives_is_valid() {
    let source = r#"
[[families_r3]]
id = "03.15"
name = "Planning"
controls = [{ id = "03.15.02", name = "System Security Plan" }]
"#;
    let file = parse_source(source).unwrap();
    assert_eq!(file.families_r3[0].controls[0].objectives().len(), 0);
}
