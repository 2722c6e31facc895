//! Artifact persistence: uploads and outputs storage areas.
//!
//! Both areas are plain directories handed in at construction (no implicit
//! process-global paths) and created on first write. Names collide by
//! overwriting; there is no index, metadata, or expiry.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SketchError;

/// Name used when an upload carries no usable filename.
pub const FALLBACK_UPLOAD_NAME: &str = "uploaded_image";
/// Suffix appended to the original's stem for the derived sketch.
const SKETCH_SUFFIX: &str = "_sketch";
/// Sketches are always PNG-encoded.
const SKETCH_EXTENSION: &str = "png";

/// Writes original uploads and derived sketches under two directories.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    uploads: PathBuf,
    outputs: PathBuf,
}

impl ArtifactStore {
    pub fn new(uploads: impl Into<PathBuf>, outputs: impl Into<PathBuf>) -> Self {
        Self {
            uploads: uploads.into(),
            outputs: outputs.into(),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads
    }

    pub fn outputs_dir(&self) -> &Path {
        &self.outputs
    }

    /// Write the original upload verbatim under its (sanitized) name.
    pub fn store_original(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SketchError> {
        write_artifact(&self.uploads, &safe_file_name(filename), bytes)
    }

    /// Write the encoded sketch under the name derived from the original.
    pub fn store_sketch(&self, original_name: &str, png: &[u8]) -> Result<PathBuf, SketchError> {
        write_artifact(&self.outputs, &sketch_file_name(original_name), png)
    }
}

/// Reduce a client-supplied filename to its final path component, falling
/// back to [`FALLBACK_UPLOAD_NAME`] when nothing usable remains.
pub fn safe_file_name(raw: &str) -> String {
    let name = Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    if name.is_empty() {
        FALLBACK_UPLOAD_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Derived sketch name: original stem + `_sketch.png`.
pub fn sketch_file_name(original: &str) -> String {
    let safe = safe_file_name(original);
    let stem = Path::new(&safe)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(FALLBACK_UPLOAD_NAME);
    format!("{stem}{SKETCH_SUFFIX}.{SKETCH_EXTENSION}")
}

fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, SketchError> {
    fs::create_dir_all(dir).map_err(|e| SketchError::storage(dir, e))?;
    let path = dir.join(name);
    fs::write(&path, bytes).map_err(|e| SketchError::storage(&path, e))?;
    Ok(path)
}
