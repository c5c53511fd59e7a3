use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::SegmentParams;
use crate::error::Result;
use crate::types::{OutputFormat, Region};

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub file_name: String,
    /// Zero-based delivery batch
    pub batch: usize,
    pub region: Region,
}

/// Sidecar describing where every photocard came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub source: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub width: u32,
    pub height: u32,
    pub threshold: u8,
    pub candidates: usize,
    pub format: OutputFormat,
    pub params: SegmentParams,
    pub photocards: Vec<ManifestEntry>,
}

pub fn write_manifest(output_dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let path = output_dir.join(MANIFEST_FILE_NAME);
    let json_string = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&path, json_string)?;
    info!("Created manifest: {:?}", path);
    Ok(path)
}

pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
