//! Composite stages: ordered pipelines and feature unions.

use crate::bundle::BundleWriter;
use crate::error::{BundleError, Result};
use crate::pipeline::kind::{OP_FEATURE_UNION, OP_PIPELINE};
use crate::pipeline::stage::{Stage, Step};
use std::collections::HashSet;
use std::path::Path;

/// Read-only view over a stage that owns named children.
///
/// The bundle documents (`bundle.json`, `model.json`, `node.json`) are built
/// from this view alone.
pub trait StepContainer {
    fn name(&self) -> &str;
    fn op(&self) -> &str;
    fn steps(&self) -> &[Step];
}

// ==================== Pipeline ====================

/// An ordered sequence of named stages. Order is execution order.
#[derive(Debug)]
pub struct Pipeline {
    name: String,
    steps: Vec<Step>,
    serializable: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create an empty pipeline with a generated `pipeline_<uuid>` name.
    pub fn new() -> Self {
        Self::named(format!("{}_{}", OP_PIPELINE, uuid::Uuid::new_v4()))
    }

    /// Create an empty pipeline with an explicit name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            serializable: true,
        }
    }

    /// Append a step (builder style).
    pub fn with_step(mut self, name: impl Into<String>, stage: impl Into<Stage>) -> Self {
        self.push_step(name, stage);
        self
    }

    /// Append a step.
    pub fn push_step(&mut self, name: impl Into<String>, stage: impl Into<Stage>) {
        self.steps.push(Step::new(name, stage));
    }

    /// Mark this pipeline (and therefore its whole subtree) as excluded from bundles.
    pub fn with_serializable(mut self, serializable: bool) -> Self {
        self.serializable = serializable;
        self
    }

    pub fn serializable(&self) -> bool {
        self.serializable
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Find a direct child by step name.
    pub fn get(&self, name: &str) -> Option<&Stage> {
        self.steps.iter().find(|s| s.name == name).map(|s| &s.stage)
    }

    /// Check step names across the whole tree.
    ///
    /// Every name must be usable as a directory entry and unique among its
    /// siblings.
    pub fn validate(&self) -> Result<()> {
        validate_steps(&self.name, &self.steps)
    }
}

impl StepContainer for Pipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn op(&self) -> &str {
        OP_PIPELINE
    }

    fn steps(&self) -> &[Step] {
        &self.steps
    }
}

// ==================== Feature Union ====================

/// A fan-out stage whose branches run side by side.
#[derive(Debug)]
pub struct FeatureUnion {
    name: String,
    branches: Vec<Step>,
    serializable: bool,
}

impl Default for FeatureUnion {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureUnion {
    /// Create an empty union with a generated `feature_union_<uuid>` name.
    pub fn new() -> Self {
        Self::named(format!("{}_{}", OP_FEATURE_UNION, uuid::Uuid::new_v4()))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            branches: Vec::new(),
            serializable: true,
        }
    }

    /// Add a branch (builder style).
    pub fn with_branch(mut self, name: impl Into<String>, stage: impl Into<Stage>) -> Self {
        self.push_branch(name, stage);
        self
    }

    pub fn push_branch(&mut self, name: impl Into<String>, stage: impl Into<Stage>) {
        self.branches.push(Step::new(name, stage));
    }

    pub fn with_serializable(mut self, serializable: bool) -> Self {
        self.serializable = serializable;
        self
    }

    pub fn serializable(&self) -> bool {
        self.serializable
    }

    pub fn branches(&self) -> &[Step] {
        &self.branches
    }

    /// Lay the union out under `dir`.
    ///
    /// The union has no directory of its own: each bundled branch is written
    /// straight into `dir`, matching the flattened names its parent records.
    pub fn write_to_bundle(&self, writer: &BundleWriter, dir: &Path, name: &str) -> Result<()> {
        tracing::trace!(
            "Writing feature union '{}' ({} branches) into {:?}",
            name,
            self.branches.len(),
            dir
        );
        writer.write_steps(dir, &self.branches)
    }
}

impl StepContainer for FeatureUnion {
    fn name(&self) -> &str {
        &self.name
    }

    fn op(&self) -> &str {
        OP_FEATURE_UNION
    }

    fn steps(&self) -> &[Step] {
        &self.branches
    }
}

// ==================== Validation ====================

fn validate_steps(parent: &str, steps: &[Step]) -> Result<()> {
    let mut seen = HashSet::new();

    for step in steps {
        validate_name(&step.name)?;

        if !seen.insert(step.name.as_str()) {
            return Err(BundleError::DuplicateStep {
                parent: parent.to_string(),
                name: step.name.clone(),
            });
        }

        match &step.stage {
            Stage::Pipeline(p) => validate_steps(&step.name, p.steps())?,
            Stage::Union(u) => validate_steps(&step.name, u.branches())?,
            Stage::Leaf(_) => {}
        }
    }

    // Union branches share the parent's directory, so they must not collide
    // with sibling steps or with branches of another union.
    let mut laid_out = HashSet::new();
    for name in laid_out_names(steps) {
        if !laid_out.insert(name) {
            return Err(BundleError::DuplicateStep {
                parent: parent.to_string(),
                name: name.to_string(),
            });
        }
    }

    Ok(())
}

/// Names that end up directly in the parent's directory: unions are
/// replaced by their branches, recursively.
fn laid_out_names(steps: &[Step]) -> Vec<&str> {
    let mut names = Vec::new();
    for step in steps {
        match &step.stage {
            Stage::Union(u) => names.extend(laid_out_names(u.branches())),
            _ => names.push(step.name.as_str()),
        }
    }
    names
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(BundleError::InvalidStepName(name.to_string()));
    }
    Ok(())
}
