//! Outbound side of the pipeline: something that accepts one batch of encoded
//! photocards at a time, or is told that nothing was found.
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::processing::batch::Batch;
use crate::error::{Error, Result};
use crate::io::writers::EncodedPhoto;
use crate::io::writers::manifest::ManifestEntry;

/// Shown to the user when a template yields no photocards
pub const NO_PHOTOCARDS_MESSAGE: &str =
    "No photocards found. Try cropping the template such that only the photocards are in frame!";

/// Receiver of delivery units, e.g. one chat message per batch.
pub trait DeliveryPort {
    fn deliver(&mut self, batch_index: usize, batch: Batch<EncodedPhoto>) -> Result<()>;

    /// Called instead of `deliver` when extraction found nothing.
    fn no_photos(&mut self) -> Result<()>;
}

/// Writes every delivered photocard into one directory.
#[derive(Debug)]
pub struct DirectoryPort {
    dir: PathBuf,
    entries: Vec<ManifestEntry>,
    empty: bool,
}

impl DirectoryPort {
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            entries: Vec::new(),
            empty: false,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Manifest rows for everything written so far
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ManifestEntry> {
        self.entries
    }

    /// Whether `no_photos` was signalled
    pub fn was_empty(&self) -> bool {
        self.empty
    }
}

impl DeliveryPort for DirectoryPort {
    fn deliver(&mut self, batch_index: usize, batch: Batch<EncodedPhoto>) -> Result<()> {
        let count = batch.len();
        for photo in batch {
            let path = self.dir.join(&photo.file_name);
            std::fs::write(&path, &photo.bytes)
                .map_err(|e| Error::delivery(format!("{}: {}", path.display(), e)))?;
            self.entries.push(ManifestEntry {
                index: photo.index,
                file_name: photo.file_name,
                batch: batch_index,
                region: photo.region,
            });
        }
        info!("Delivered batch {} ({} photocards) to {:?}", batch_index, count, self.dir);
        Ok(())
    }

    fn no_photos(&mut self) -> Result<()> {
        self.empty = true;
        warn!("{}", NO_PHOTOCARDS_MESSAGE);
        Ok(())
    }
}

/// Keeps delivered batches in memory.
#[derive(Debug, Default)]
pub struct MemoryPort {
    pub batches: Vec<Batch<EncodedPhoto>>,
    pub empty_notices: usize,
}

impl DeliveryPort for MemoryPort {
    fn deliver(&mut self, _batch_index: usize, batch: Batch<EncodedPhoto>) -> Result<()> {
        self.batches.push(batch);
        Ok(())
    }

    fn no_photos(&mut self) -> Result<()> {
        self.empty_notices += 1;
        Ok(())
    }
}
