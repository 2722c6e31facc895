//! Service configuration loaded from a JSON file.
//!
//! Every field has a default so a missing or partial config still yields a
//! runnable service; the storage roots are explicit values here rather than
//! paths hard-coded at the write sites.
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SketchError;
use crate::sketch::SketchParams;

/// Default maximum accepted upload size (25 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds to.
    pub listen: SocketAddr,
    /// Storage area for original uploads.
    pub uploads_dir: PathBuf,
    /// Storage area for derived sketches.
    pub outputs_dir: PathBuf,
    /// CORS origin allowed to call the service; `None` permits any origin.
    pub allowed_origin: Option<String>,
    /// Multipart form length cap in bytes.
    pub max_upload_bytes: u64,
    /// Transform parameters.
    pub sketch: SketchParams,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080),
            uploads_dir: PathBuf::from("uploads"),
            outputs_dir: PathBuf::from("outputs"),
            allowed_origin: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            sketch: SketchParams::default(),
        }
    }
}

/// Read and parse a JSON config file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, SketchError> {
    let data = fs::read_to_string(path).map_err(|e| SketchError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&data).map_err(|e| SketchError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
