//! Error handling for bundle serialization
//!
//! This module defines the error type and Result alias used throughout
//! the crate.

use std::path::Path;
use thiserror::Error;

/// Main error type for bundle operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// Filesystem errors (permission denied, disk full, invalid path)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested operation is a declared non-capability of this crate
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Two steps share a name under the same parent
    #[error("Duplicate step '{name}' in '{parent}'")]
    DuplicateStep { parent: String, name: String },

    /// A step name cannot be used as a directory entry
    #[error("Invalid step name: {0:?}")]
    InvalidStepName(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<BundleError>,
    },
}

impl BundleError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        BundleError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Wrap an IO error with the path it failed on
    pub fn io_at(path: &Path, err: std::io::Error) -> Self {
        BundleError::Io(err).with_context(format!("{}", path.display()))
    }

    /// Strip any context layers and return the underlying error
    pub fn root_cause(&self) -> &BundleError {
        match self {
            BundleError::WithContext { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether this error (ignoring context) is an unsupported operation
    pub fn is_unsupported(&self) -> bool {
        matches!(self.root_cause(), BundleError::UnsupportedOperation(_))
    }
}

/// Result type alias for bundle operations
pub type Result<T> = std::result::Result<T, BundleError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| BundleError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| BundleError::Io(e).with_context(f()))
    }
}
