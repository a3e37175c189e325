//! Stage abstraction for the pipeline.
//!
//! Two-layer design:
//! - **`Transformer` trait**: for leaf stages supplied by the caller. A leaf
//!   knows its own op and how to lay itself out inside a bundle.
//! - **`Stage` enum**: the closed set of node kinds the writer understands.
//!   Pipelines and unions are structural and owned by this crate; everything
//!   else is a `Leaf` wrapping a trait object.

use crate::bundle::BundleWriter;
use crate::error::Result;
use crate::pipeline::composite::{FeatureUnion, Pipeline};
use crate::pipeline::kind::{StageKind, OP_FEATURE_UNION, OP_PIPELINE};
use std::fmt;
use std::path::Path;

/// Trait for caller-defined leaf transformers.
pub trait Transformer {
    /// Operation identifier recorded in the leaf's model document.
    fn op(&self) -> &str;

    /// Whether this stage participates in bundle output.
    fn serializable(&self) -> bool {
        true
    }

    /// Whether this stage can write itself at all. A stage without the
    /// capability is skipped as if it were not part of the pipeline.
    fn supports_bundle(&self) -> bool {
        true
    }

    /// Write this stage into `dir` under `name`.
    ///
    /// `dir` is the parent's directory; the leaf decides its own layout
    /// beneath it. Leaves never create or clear the bundle root.
    fn write_to_bundle(&self, writer: &BundleWriter, dir: &Path, name: &str) -> Result<()>;
}

/// A node in the stage tree.
pub enum Stage {
    Leaf(Box<dyn Transformer>),
    Pipeline(Pipeline),
    Union(FeatureUnion),
}

impl Stage {
    /// Wrap a leaf transformer.
    pub fn leaf(transformer: impl Transformer + 'static) -> Self {
        Stage::Leaf(Box::new(transformer))
    }

    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Leaf(_) => StageKind::Leaf,
            Stage::Pipeline(_) => StageKind::Pipeline,
            Stage::Union(_) => StageKind::FeatureUnion,
        }
    }

    pub fn op(&self) -> &str {
        match self {
            Stage::Leaf(t) => t.op(),
            Stage::Pipeline(_) => OP_PIPELINE,
            Stage::Union(_) => OP_FEATURE_UNION,
        }
    }

    pub fn serializable(&self) -> bool {
        match self {
            Stage::Leaf(t) => t.serializable(),
            Stage::Pipeline(p) => p.serializable(),
            Stage::Union(u) => u.serializable(),
        }
    }

    pub fn supports_bundle(&self) -> bool {
        match self {
            Stage::Leaf(t) => t.supports_bundle(),
            Stage::Pipeline(_) | Stage::Union(_) => true,
        }
    }

    /// Capability-complete and flagged serializable.
    pub fn is_bundled(&self) -> bool {
        self.supports_bundle() && self.serializable()
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Leaf(t) => f
                .debug_struct("Leaf")
                .field("op", &t.op())
                .field("serializable", &t.serializable())
                .field("supports_bundle", &t.supports_bundle())
                .finish(),
            Stage::Pipeline(p) => fmt::Debug::fmt(p, f),
            Stage::Union(u) => fmt::Debug::fmt(u, f),
        }
    }
}

impl From<Pipeline> for Stage {
    fn from(pipeline: Pipeline) -> Self {
        Stage::Pipeline(pipeline)
    }
}

impl From<FeatureUnion> for Stage {
    fn from(union: FeatureUnion) -> Self {
        Stage::Union(union)
    }
}

impl From<Box<dyn Transformer>> for Stage {
    fn from(transformer: Box<dyn Transformer>) -> Self {
        Stage::Leaf(transformer)
    }
}

/// One named entry in a pipeline's step list or a union's branch list.
#[derive(Debug)]
pub struct Step {
    pub name: String,
    pub stage: Stage,
}

impl Step {
    pub fn new(name: impl Into<String>, stage: impl Into<Stage>) -> Self {
        Self {
            name: name.into(),
            stage: stage.into(),
        }
    }
}
