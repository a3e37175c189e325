//! Test data builders for creating test pipelines

use pipeline_bundle::{FeatureUnion, ParamTransformer, Pipeline};

/// Builder for creating test leaves
pub struct LeafBuilder {
    op: String,
    serializable: bool,
    supports_bundle: bool,
}

impl LeafBuilder {
    pub fn new(op: &str) -> Self {
        Self {
            op: op.to_string(),
            serializable: true,
            supports_bundle: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.serializable = false;
        self
    }

    pub fn incapable(mut self) -> Self {
        self.supports_bundle = false;
        self
    }

    pub fn build(self) -> ParamTransformer {
        ParamTransformer::new(self.op)
            .with_serializable(self.serializable)
            .with_bundle_support(self.supports_bundle)
            .with_input("features", "input")
            .with_output("prediction", "output")
    }
}

/// A pipeline of serializable leaves named after `names`
pub fn flat_pipeline(name: &str, names: &[&str]) -> Pipeline {
    names.iter().fold(Pipeline::named(name), |p, step| {
        p.with_step(*step, LeafBuilder::new("standard_scaler").build())
    })
}

/// A union of serializable leaves named after `names`
pub fn flat_union(name: &str, names: &[&str]) -> FeatureUnion {
    names.iter().fold(FeatureUnion::named(name), |u, branch| {
        u.with_branch(*branch, LeafBuilder::new("pca").build())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_bundle::{StepContainer, Transformer};

    #[test]
    fn test_leaf_builder() {
        let leaf = LeafBuilder::new("pca").hidden().build();
        assert_eq!(leaf.op(), "pca");
        assert!(!leaf.serializable());
        assert!(leaf.supports_bundle());
    }

    #[test]
    fn test_flat_pipeline() {
        let pipeline = flat_pipeline("p", &["a", "b"]);
        assert_eq!(pipeline.steps().len(), 2);
    }
}
