//! Test to verify test infrastructure works correctly

mod common;

use common::builders::LeafBuilder;
use pipeline_bundle::{StepContainer, Transformer};

#[test]
fn test_infrastructure_setup() {
    // Test that builders work
    let leaf = LeafBuilder::new("imputer").incapable().build();

    assert_eq!(leaf.op(), "imputer");
    assert!(leaf.serializable());
    assert!(!leaf.supports_bundle());
}

#[test]
fn test_tree_listing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("a.node")).unwrap();
    std::fs::write(dir.path().join("a.node/model.json"), "{}").unwrap();

    assert_eq!(common::tree(dir.path()), ["a.node/", "a.node/model.json"]);
}

#[test]
fn test_flat_union_builder() {
    let union = common::builders::flat_union("u", &["a", "b"]);
    assert_eq!(union.steps().len(), 2);
    assert_eq!(union.name(), "u");
}

#[test]
#[should_panic]
fn test_read_json_rejects_missing_file() {
    common::read_json("/nonexistent/bundle.json");
}
