//! Recursive bundle writer.
//!
//! Maps a stage tree onto a directory tree:
//!
//! ```text
//! <path>/<model_name>/        bundle root, recreated on every init write
//!   bundle.json
//!   model.json
//!   node.json
//!   <pipeline>.node/          one per nested pipeline, written by the parent
//!   <leaf>...                 whatever the leaf's own writer lays out
//! ```

use crate::bundle::document::{
    Attribute, BundleManifest, ModelDocument, NodeDocument, SerializationFormat, Shape,
    NODES_ATTRIBUTE, PIPELINE_NODE_NAME,
};
use crate::bundle::fs;
use crate::config::{BundleConfig, BUNDLE_FILE, MODEL_FILE, NODE_DIR_SUFFIX, NODE_FILE};
use crate::error::{BundleError, Result};
use crate::pipeline::{Pipeline, Stage, Step, StepContainer};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Writes stage trees as directory bundles.
#[derive(Debug, Clone, Default)]
pub struct BundleWriter {
    config: BundleConfig,
}

impl BundleWriter {
    /// Create a writer, rejecting unusable configuration up front.
    pub fn new(config: BundleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    /// Directory an `init` write of `model_name` under `path` lands in.
    pub fn bundle_path(path: impl AsRef<Path>, model_name: &str) -> PathBuf {
        path.as_ref().join(model_name)
    }

    /// Serialize `pipeline`.
    ///
    /// With `init` set, `path/model_name` is removed if present and recreated,
    /// and receives `bundle.json` alongside the pipeline's own model and node
    /// documents. Without it, the model and node documents go straight into
    /// `path` and `model_name` is unused. Either way the steps follow.
    pub fn write(
        &self,
        pipeline: &Pipeline,
        path: impl AsRef<Path>,
        model_name: &str,
        init: bool,
    ) -> Result<()> {
        let path = path.as_ref();

        let model_dir = if init {
            pipeline.validate()?;
            let root = self.init_root(path, model_name)?;
            self.write_document(&root.join(BUNDLE_FILE), &self.get_bundle(pipeline))?;
            root
        } else {
            path.to_path_buf()
        };

        self.write_node_files(&model_dir, pipeline)?;
        self.write_steps(&model_dir, pipeline.steps())?;

        if init {
            tracing::info!(
                "Wrote bundle '{}' to {:?} ({} top-level nodes)",
                pipeline.name(),
                model_dir,
                self.extract_nodes(pipeline.steps()).len()
            );
        }
        Ok(())
    }

    /// Always fails: reading bundles back is not supported.
    pub fn deserialize_from_bundle(&self, path: impl AsRef<Path>) -> Result<Pipeline> {
        Err(BundleError::UnsupportedOperation(format!(
            "deserializing a bundle from {:?}",
            path.as_ref()
        )))
    }

    /// Write each bundled step into `dir`, dispatching on stage kind.
    ///
    /// Steps that are not serializable or lack the write capability are
    /// skipped together with everything beneath them. Unions are always
    /// walked: their bundled branches are named by the parent regardless of
    /// the union's own flag, so they must land on disk too.
    pub fn write_steps(&self, dir: &Path, steps: &[Step]) -> Result<()> {
        let walked = steps
            .iter()
            .filter(|s| matches!(s.stage, Stage::Union(_)) || s.stage.is_bundled());

        for step in walked {
            tracing::trace!("Writing {} '{}' under {:?}", step.stage.kind(), step.name, dir);
            match &step.stage {
                Stage::Pipeline(nested) => {
                    let node_dir = dir.join(format!("{}{}", step.name, NODE_DIR_SUFFIX));
                    std::fs::create_dir(&node_dir)
                        .map_err(|e| BundleError::io_at(&node_dir, e))?;
                    self.write_node_files(&node_dir, nested)?;
                    self.write_steps(&node_dir, nested.steps())?;
                }
                Stage::Union(union) => union.write_to_bundle(self, dir, &step.name)?,
                Stage::Leaf(leaf) => leaf.write_to_bundle(self, dir, &step.name)?,
            }
        }
        Ok(())
    }

    /// Encode `doc` with the configured indentation and write it to `path`.
    pub fn write_document<T: Serialize + ?Sized>(&self, path: &Path, doc: &T) -> Result<()> {
        let bytes = fs::to_pretty_json(doc, self.config.indent)?;
        fs::write_file(path, &bytes, self.config.atomic_writes)?;
        tracing::trace!("Wrote {:?}", path);
        Ok(())
    }

    /// Root manifest for `transformer`.
    pub fn get_bundle<C: StepContainer + ?Sized>(&self, transformer: &C) -> BundleManifest {
        BundleManifest {
            name: transformer.name().to_string(),
            format: SerializationFormat::Json,
            version: self.config.version.clone(),
            nodes: self.extract_nodes(transformer.steps()),
        }
    }

    /// Shape document for a pipeline-kind stage. Inputs and outputs are
    /// always empty.
    pub fn get_node<C: StepContainer + ?Sized>(&self, _transformer: &C) -> NodeDocument {
        NodeDocument {
            name: PIPELINE_NODE_NAME.to_string(),
            shape: Shape::default(),
        }
    }

    /// Model document for a pipeline-kind stage: its op plus a `nodes`
    /// attribute, emitted even when empty.
    pub fn get_model<C: StepContainer + ?Sized>(&self, transformer: &C) -> ModelDocument {
        ModelDocument {
            op: transformer.op().to_string(),
            attributes: vec![Attribute::string_list(
                NODES_ATTRIBUTE,
                self.extract_nodes(transformer.steps()),
            )],
        }
    }

    /// Names to record for `steps`, in order.
    ///
    /// A feature union is replaced by the names of its bundled branches (one
    /// level only). Any other stage contributes its own name when bundled;
    /// otherwise it and its whole subtree are left out.
    pub fn extract_nodes(&self, steps: &[Step]) -> Vec<String> {
        let mut names = Vec::new();
        for step in steps {
            match &step.stage {
                Stage::Union(union) => names.extend(
                    union
                        .branches()
                        .iter()
                        .filter(|b| b.stage.is_bundled())
                        .map(|b| b.name.clone()),
                ),
                stage if stage.is_bundled() => names.push(step.name.clone()),
                _ => {}
            }
        }
        names
    }

    fn init_root(&self, path: &Path, model_name: &str) -> Result<PathBuf> {
        let root = Self::bundle_path(path, model_name);

        std::fs::create_dir_all(path).map_err(|e| BundleError::io_at(path, e))?;
        if fs::remove_existing(&root)? {
            tracing::debug!("Removed existing bundle at {:?}", root);
        }
        std::fs::create_dir(&root).map_err(|e| BundleError::io_at(&root, e))?;

        tracing::debug!("Created bundle root {:?}", root);
        Ok(root)
    }

    fn write_node_files<C: StepContainer + ?Sized>(&self, dir: &Path, transformer: &C) -> Result<()> {
        self.write_document(&dir.join(MODEL_FILE), &self.get_model(transformer))?;
        self.write_document(&dir.join(NODE_FILE), &self.get_node(transformer))
    }
}
