//! Directory bundle output.
//!
//! A bundle is a directory tree of pretty-printed JSON documents:
//! a root `bundle.json` manifest, and a `model.json` / `node.json` pair for
//! every stage that is written. See [`writer`] for the layout rules.

pub mod document;
pub mod fs;
pub mod writer;

pub use document::{
    Attribute, AttributeType, BasicType, BundleManifest, ModelDocument, NodeDocument,
    SerializationFormat, Shape, Socket, TypeKind,
};
pub use writer::BundleWriter;
