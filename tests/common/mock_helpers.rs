//! Mock construction helpers

use mockall::mock;
use pipeline_bundle::{BundleWriter, Result, Transformer};
use std::path::Path;

mock! {
    pub Leaf {}

    impl Transformer for Leaf {
        fn op(&self) -> &str;
        fn serializable(&self) -> bool;
        fn supports_bundle(&self) -> bool;
        fn write_to_bundle(&self, writer: &BundleWriter, dir: &Path, name: &str) -> Result<()>;
    }
}

/// A mocked leaf whose capability flags are fixed and whose writes are
/// not expected unless the caller adds an expectation
pub fn mock_leaf(op: &str, serializable: bool, supports_bundle: bool) -> MockLeaf {
    let mut leaf = MockLeaf::new();
    leaf.expect_op().return_const(op.to_string());
    leaf.expect_serializable().return_const(serializable);
    leaf.expect_supports_bundle().return_const(supports_bundle);
    leaf
}
