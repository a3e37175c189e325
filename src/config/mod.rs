//! Configuration module for bundle serialization
//!
//! The writer is configured once at construction time with a [`BundleConfig`].
//! The configuration is immutable for the lifetime of the writer, so every
//! bundle produced by one writer carries the same version string.
//!
//! # Files
//!
//! A configuration can be persisted either as JSON or as TOML. The format is
//! chosen from the file extension (`.toml` selects TOML, anything else JSON).
//!
//! # Example
//!
//! ```no_run
//! use pipeline_bundle::config::BundleConfig;
//! use pipeline_bundle::BundleWriter;
//!
//! # fn main() -> pipeline_bundle::Result<()> {
//! let config = BundleConfig::load_or_default("bundle.toml");
//! let writer = BundleWriter::new(config)?;
//! # Ok(())
//! # }
//! ```

use crate::error::{BundleError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializer version recorded in every `bundle.json`
pub const BUNDLE_VERSION: &str = "0.5.0-SNAPSHOT";

/// Root manifest filename
pub const BUNDLE_FILE: &str = "bundle.json";

/// Per-stage model document filename
pub const MODEL_FILE: &str = "model.json";

/// Per-stage shape document filename
pub const NODE_FILE: &str = "node.json";

/// Suffix appended to a stage name to form its node directory
pub const NODE_DIR_SUFFIX: &str = ".node";

/// Default JSON indentation width
pub const DEFAULT_JSON_INDENT: usize = 3;

/// Upper bound on the configurable indentation width
pub const MAX_JSON_INDENT: usize = 16;

// ==================== Bundle Config ====================

/// Writer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Version string written into `bundle.json`
    pub version: String,

    /// Number of spaces used to indent emitted JSON
    pub indent: usize,

    /// Write each file to a temporary sibling first, then rename it into place
    pub atomic_writes: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            version: BUNDLE_VERSION.to_string(),
            indent: DEFAULT_JSON_INDENT,
            atomic_writes: true,
        }
    }
}

impl BundleConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the bundle version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Override the JSON indentation width
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable atomic per-file writes
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    /// Check that the configuration can be used by a writer
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(BundleError::Config("version must not be empty".to_string()));
        }
        if self.indent > MAX_JSON_INDENT {
            return Err(BundleError::Config(format!(
                "indent {} exceeds maximum of {}",
                self.indent, MAX_JSON_INDENT
            )));
        }
        Ok(())
    }

    /// Load a configuration file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BundleError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Self = if is_toml(path) {
            toml::from_str(&content).map_err(|e| {
                BundleError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                BundleError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load bundle config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the configuration to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BundleError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = if is_toml(path) {
            toml::to_string_pretty(self)
                .map_err(|e| BundleError::Config(format!("Failed to serialize config: {}", e)))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| BundleError::Config(format!("Failed to serialize config: {}", e)))?
        };

        std::fs::write(path, content).map_err(|e| {
            BundleError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BundleConfig::default();
        assert_eq!(config.version, BUNDLE_VERSION);
        assert_eq!(config.indent, DEFAULT_JSON_INDENT);
        assert!(config.atomic_writes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_version() {
        let config = BundleConfig::new().with_version("  ");
        assert!(matches!(config.validate(), Err(BundleError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_huge_indent() {
        let config = BundleConfig::new().with_indent(MAX_JSON_INDENT + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");
        let config = BundleConfig::new().with_version("1.2.3").with_indent(2);

        config.save(&path).unwrap();
        let loaded = BundleConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_toml_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.toml");
        std::fs::write(&path, "version = \"2.0.0\"\n").unwrap();

        let loaded = BundleConfig::load(&path).unwrap();
        assert_eq!(loaded.version, "2.0.0");
        assert_eq!(loaded.indent, DEFAULT_JSON_INDENT);
        assert!(loaded.atomic_writes);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = BundleConfig::load_or_default(dir.path().join("missing.json"));
        assert_eq!(config, BundleConfig::default());
    }
}
