//! A self-describing leaf transformer.
//!
//! `ParamTransformer` carries an op, a list of typed attributes and its
//! declared input/output sockets. It lays itself out as
//! `<dir>/<name>.node/{model.json,node.json}`.

use crate::bundle::document::{Attribute, ModelDocument, NodeDocument, Shape, Socket};
use crate::bundle::BundleWriter;
use crate::config::{MODEL_FILE, NODE_DIR_SUFFIX, NODE_FILE};
use crate::error::{BundleError, Result};
use crate::pipeline::stage::{Stage, Transformer};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ParamTransformer {
    op: String,
    attributes: Vec<Attribute>,
    shape: Shape,
    serializable: bool,
    supports_bundle: bool,
}

impl ParamTransformer {
    pub fn new(op: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            attributes: Vec::new(),
            shape: Shape::default(),
            serializable: true,
            supports_bundle: true,
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Declare an input socket, e.g. `("features", "input")`.
    pub fn with_input(mut self, name: impl Into<String>, port: impl Into<String>) -> Self {
        self.shape.inputs.push(Socket::new(name, port));
        self
    }

    /// Declare an output socket, e.g. `("scaled", "output")`.
    pub fn with_output(mut self, name: impl Into<String>, port: impl Into<String>) -> Self {
        self.shape.outputs.push(Socket::new(name, port));
        self
    }

    pub fn with_serializable(mut self, serializable: bool) -> Self {
        self.serializable = serializable;
        self
    }

    /// Toggle the write capability. A leaf without it is skipped entirely.
    pub fn with_bundle_support(mut self, supported: bool) -> Self {
        self.supports_bundle = supported;
        self
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn model(&self) -> ModelDocument {
        ModelDocument {
            op: self.op.clone(),
            attributes: self.attributes.clone(),
        }
    }

    pub fn node(&self, name: &str) -> NodeDocument {
        NodeDocument {
            name: name.to_string(),
            shape: self.shape.clone(),
        }
    }
}

impl Transformer for ParamTransformer {
    fn op(&self) -> &str {
        &self.op
    }

    fn serializable(&self) -> bool {
        self.serializable
    }

    fn supports_bundle(&self) -> bool {
        self.supports_bundle
    }

    fn write_to_bundle(&self, writer: &BundleWriter, dir: &Path, name: &str) -> Result<()> {
        let node_dir = dir.join(format!("{}{}", name, NODE_DIR_SUFFIX));
        std::fs::create_dir(&node_dir).map_err(|e| BundleError::io_at(&node_dir, e))?;

        writer.write_document(&node_dir.join(MODEL_FILE), &self.model())?;
        writer.write_document(&node_dir.join(NODE_FILE), &self.node(name))?;

        tracing::trace!("Wrote leaf '{}' ({}) into {:?}", name, self.op, node_dir);
        Ok(())
    }
}

impl From<ParamTransformer> for Stage {
    fn from(transformer: ParamTransformer) -> Self {
        Stage::leaf(transformer)
    }
}
