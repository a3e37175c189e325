//! Stage tree consumed by the bundle writer.
//!
//! A pipeline is an ordered list of named steps. Each step is one of three
//! kinds: a leaf transformer, a nested pipeline, or a feature union whose
//! branches fan out side by side.
//!
//! # Architecture
//!
//! ```text
//! Pipeline ──► [scale: Leaf] ──► [features: FeatureUnion] ──► [model: Pipeline]
//!                                     ├── [pca: Leaf]               └── [clf: Leaf]
//!                                     └── [kbest: Leaf]
//! ```
//!
//! # Design
//!
//! - **Enum dispatch on stage kind**: `Stage` is a closed `Leaf | Pipeline | Union`.
//! - **Trait for leaves**: `Transformer` is the open extension point.
//! - **Read-only traversal**: the writer only borrows the tree.

pub mod composite;
pub mod kind;
pub mod leaf;
pub mod stage;

pub use composite::{FeatureUnion, Pipeline, StepContainer};
pub use kind::{StageKind, OP_FEATURE_UNION, OP_PIPELINE};
pub use leaf::ParamTransformer;
pub use stage::{Stage, Step, Transformer};
