//! Stage kind enumeration.
//!
//! The writer branches on these three kinds when laying out a bundle and
//! names them in its trace output.

use serde::{Deserialize, Serialize};

/// Op recorded for nested pipelines.
pub const OP_PIPELINE: &str = "pipeline";

/// Op recorded for feature unions.
pub const OP_FEATURE_UNION: &str = "feature_union";

/// Kinds of stages the bundle writer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// An ordered sequence of child stages.
    Pipeline,
    /// A fan-out over independently named branches.
    FeatureUnion,
    /// A self-serializing transformer.
    Leaf,
}

impl StageKind {
    /// Get the display name for this stage kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            StageKind::Pipeline => "Pipeline",
            StageKind::FeatureUnion => "Feature Union",
            StageKind::Leaf => "Leaf",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
