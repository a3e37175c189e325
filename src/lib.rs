//! # pipeline-bundle: directory bundles for model pipelines
//!
//! Walks a tree of transformation stages (leaf transformers, nested
//! pipelines and feature unions) and writes a self-describing directory
//! bundle that an independent runtime can load later. Only the write path
//! exists; reading a bundle back fails with an unsupported-operation error.
//!
//! ## Architecture
//!
//! - **Pipeline**: the stage tree (`Stage`, `Step`, `Pipeline`, `FeatureUnion`)
//!   and the `Transformer` trait leaf stages implement
//! - **Bundle**: the JSON documents and the recursive `BundleWriter`
//! - **Config**: writer settings, fixed for the lifetime of a writer
//!
//! ## Example
//!
//! ```no_run
//! use pipeline_bundle::{Attribute, BundleWriter, FeatureUnion, ParamTransformer, Pipeline};
//!
//! # fn main() -> pipeline_bundle::Result<()> {
//! let pipeline = Pipeline::named("churn")
//!     .with_step(
//!         "scale",
//!         ParamTransformer::new("standard_scaler")
//!             .with_attribute(Attribute::double_list("mean", vec![0.0, 1.0])),
//!     )
//!     .with_step(
//!         "features",
//!         FeatureUnion::named("features")
//!             .with_branch("pca", ParamTransformer::new("pca"))
//!             .with_branch("kbest", ParamTransformer::new("select_k_best")),
//!     )
//!     .with_step(
//!         "model",
//!         Pipeline::named("model").with_step("clf", ParamTransformer::new("logistic_regression")),
//!     );
//!
//! BundleWriter::default().write(&pipeline, "/tmp/bundles", "churn", true)?;
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod config;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use bundle::{Attribute, BundleManifest, BundleWriter, ModelDocument, NodeDocument};
pub use config::{BundleConfig, BUNDLE_VERSION};
pub use error::{BundleError, Result, ResultExt};
pub use pipeline::{FeatureUnion, ParamTransformer, Pipeline, Stage, Step, StepContainer, Transformer};
