//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use serde_json::Value;
use std::path::Path;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per test binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pipeline_bundle=trace")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Read and parse a JSON document from disk
pub fn read_json(path: impl AsRef<Path>) -> Value {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Invalid JSON in {:?}: {}", path, e))
}

/// Sorted key names of a JSON object
pub fn keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value
        .as_object()
        .expect("Expected a JSON object")
        .keys()
        .cloned()
        .collect();
    keys.sort();
    keys
}

/// The `nodes` list recorded in a `bundle.json`
pub fn bundle_nodes(bundle_dir: &Path) -> Vec<String> {
    string_list(&read_json(bundle_dir.join("bundle.json"))["nodes"])
}

/// The `nodes` attribute value recorded in a `model.json`
pub fn model_nodes(node_dir: &Path) -> Vec<String> {
    let model = read_json(node_dir.join("model.json"));
    let attrs = model["attributes"].as_array().expect("attributes array");
    let nodes = attrs
        .iter()
        .find(|a| a["name"] == "nodes")
        .expect("nodes attribute");
    string_list(&nodes["value"])
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|v| v.as_str().expect("Expected a string").to_string())
        .collect()
}

/// Every file and directory under `root`, relative and sorted
pub fn tree(root: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).expect("read_dir") {
            let path = entry.expect("dir entry").path();
            let rel = path
                .strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/");
            if path.is_dir() {
                out.push(format!("{}/", rel));
                walk(root, &path, out);
            } else {
                out.push(rel);
            }
        }
    }

    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
