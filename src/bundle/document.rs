//! JSON documents that make up a bundle.
//!
//! - `bundle.json` → [`BundleManifest`]
//! - `model.json` → [`ModelDocument`]
//! - `node.json` → [`NodeDocument`]
//!
//! Key names and nesting are part of the on-disk contract and must not change.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name recorded in `node.json` for every pipeline-kind stage.
pub const PIPELINE_NODE_NAME: &str = "feature_pipeline";

/// Name of the single attribute carried by a pipeline's model document.
pub const NODES_ATTRIBUTE: &str = "nodes";

/// Encoding of the bundle's documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    #[default]
    Json,
}

/// Root manifest (`bundle.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleManifest {
    pub name: String,
    pub format: SerializationFormat,
    pub version: String,
    pub nodes: Vec<String>,
}

/// Per-stage model document (`model.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub op: String,
    pub attributes: Vec<Attribute>,
}

impl ModelDocument {
    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Per-stage shape document (`node.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub name: String,
    pub shape: Shape,
}

/// Declared input and output slots of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Shape {
    pub inputs: Vec<Socket>,
    pub outputs: Vec<Socket>,
}

/// One named slot bound to a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socket {
    pub name: String,
    pub port: String,
}

impl Socket {
    pub fn new(name: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port: port.into(),
        }
    }
}

// ==================== Attributes ====================

/// Whether an attribute holds one value or a list of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Basic,
    List,
}

/// Scalar type of an attribute's value (or of each list element).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicType {
    String,
    Double,
    Long,
    Boolean,
}

/// Serialized as `{"type": "list", "base": "string"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeType {
    #[serde(rename = "type")]
    pub kind: TypeKind,
    pub base: BasicType,
}

impl AttributeType {
    pub const fn basic(base: BasicType) -> Self {
        Self {
            kind: TypeKind::Basic,
            base,
        }
    }

    pub const fn list(base: BasicType) -> Self {
        Self {
            kind: TypeKind::List,
            base,
        }
    }
}

/// A named, typed attribute of a model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AttributeType,
    pub value: Value,
}

impl Attribute {
    fn new(name: impl Into<String>, ty: AttributeType, value: Value) -> Self {
        Self {
            name: name.into(),
            ty,
            value,
        }
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            name,
            AttributeType::basic(BasicType::String),
            Value::String(value.into()),
        )
    }

    pub fn double(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, AttributeType::basic(BasicType::Double), Value::from(value))
    }

    pub fn long(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, AttributeType::basic(BasicType::Long), Value::from(value))
    }

    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, AttributeType::basic(BasicType::Boolean), Value::Bool(value))
    }

    pub fn string_list<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(|v| Value::String(v.into())).collect();
        Self::new(name, AttributeType::list(BasicType::String), Value::Array(values))
    }

    pub fn double_list(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let values = values.into_iter().map(Value::from).collect();
        Self::new(name, AttributeType::list(BasicType::Double), Value::Array(values))
    }

    pub fn long_list(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        let values = values.into_iter().map(Value::from).collect();
        Self::new(name, AttributeType::list(BasicType::Long), Value::Array(values))
    }

    /// The value as a list of strings, if it is one.
    pub fn as_string_list(&self) -> Option<Vec<&str>> {
        self.value
            .as_array()?
            .iter()
            .map(|v| v.as_str())
            .collect()
    }
}
