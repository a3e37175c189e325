//! Filesystem helpers for bundle output.

use crate::error::{BundleError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::Path;

/// Encode `doc` as pretty-printed JSON using `indent` spaces per level.
pub fn to_pretty_json<T: Serialize + ?Sized>(doc: &T, indent: usize) -> Result<Vec<u8>> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    doc.serialize(&mut ser)
        .map_err(|e| BundleError::Serialization(e.to_string()))?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `contents` to `path`.
///
/// With `atomic` set, the bytes land in a temporary file in the same
/// directory which is then renamed over `path`, so readers never observe a
/// half-written document.
pub fn write_file(path: &Path, contents: &[u8], atomic: bool) -> Result<()> {
    if !atomic {
        return std::fs::write(path, contents).map_err(|e| BundleError::io_at(path, e));
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| BundleError::io_at(dir, e))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| BundleError::io_at(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| BundleError::io_at(path, e.error))?;
    Ok(())
}

/// Remove whatever currently sits at `path`, if anything.
pub fn remove_existing(path: &Path) -> Result<bool> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(BundleError::io_at(path, e)),
    };

    if meta.is_dir() {
        std::fs::remove_dir_all(path).map_err(|e| BundleError::io_at(path, e))?;
    } else {
        std::fs::remove_file(path).map_err(|e| BundleError::io_at(path, e))?;
    }
    Ok(true)
}
