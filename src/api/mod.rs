//! High-level, ergonomic library API: extract photocards from bytes or files,
//! deliver them in size-bounded batches through a `DeliveryPort`, and process
//! single templates or whole directories to disk. Prefer these entrypoints
//! over the low-level processing modules when integrating the crate.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use crate::core::composite::ExtractedPhoto;
use crate::core::params::SegmentParams;
use crate::core::processing::batch::BatchBuilder;
use crate::core::processing::segment::Segmenter;
use crate::error::{Error, Result};
use crate::io::decode::{decode_composite, open_composite};
use crate::io::delivery::{DeliveryPort, DirectoryPort};
use crate::io::writers::encode_photo;
use crate::io::writers::manifest::{Manifest, write_manifest};
use crate::types::OutputFormat;

/// What happened to one template's photocards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Nothing matched; the port was sent the empty-result notice instead.
    NoPhotocards,
    Delivered { photos: usize, batches: usize },
}

impl DeliveryOutcome {
    pub fn photos(&self) -> usize {
        match self {
            DeliveryOutcome::NoPhotocards => 0,
            DeliveryOutcome::Delivered { photos, .. } => *photos,
        }
    }
}

/// Decode `bytes` and cut out every photocard.
pub fn extract_from_bytes(bytes: &[u8], params: &SegmentParams) -> Result<Vec<ExtractedPhoto>> {
    let segmenter = Segmenter::new(params.clone())?;
    let composite = decode_composite(bytes)?;
    Ok(segmenter.segment(&composite))
}

pub fn extract_from_path(path: &Path, params: &SegmentParams) -> Result<Vec<ExtractedPhoto>> {
    let segmenter = Segmenter::new(params.clone())?;
    let composite = open_composite(path)?;
    Ok(segmenter.segment(&composite))
}

/// Encode photos one at a time and hand each full batch to `port` as soon as
/// it fills; the remainder goes out last. With no photos the port receives a
/// single `no_photos` call and no batches.
pub fn deliver_photos(
    photos: &[ExtractedPhoto],
    format: OutputFormat,
    max_per_batch: usize,
    port: &mut dyn DeliveryPort,
) -> Result<DeliveryOutcome> {
    let mut builder = BatchBuilder::new(max_per_batch)?;
    if photos.is_empty() {
        port.no_photos()?;
        return Ok(DeliveryOutcome::NoPhotocards);
    }

    let mut batches = 0;
    for (index, photo) in photos.iter().enumerate() {
        let encoded = encode_photo(photo, index, format)?;
        if let Some(batch) = builder.push(encoded) {
            port.deliver(batches, batch)?;
            batches += 1;
        }
    }
    if let Some(batch) = builder.finish() {
        port.deliver(batches, batch)?;
        batches += 1;
    }

    Ok(DeliveryOutcome::Delivered {
        photos: photos.len(),
        batches,
    })
}

/// Result of processing one template to a directory
#[derive(Debug, Clone)]
pub struct TemplateReport {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub threshold: u8,
    pub candidates: usize,
    pub outcome: DeliveryOutcome,
    pub manifest: Option<PathBuf>,
}

/// Split one template file into `photocard_<i>.<ext>` files under `output_dir`.
pub fn process_template_to_dir(
    input: &Path,
    output_dir: &Path,
    params: &SegmentParams,
    format: OutputFormat,
    with_manifest: bool,
) -> Result<TemplateReport> {
    let segmenter = Segmenter::new(params.clone())?;
    let composite = open_composite(input)?;
    let detection = segmenter.detect(&composite);
    let photos = segmenter.materialize(&composite, &detection.regions);

    let mut port = DirectoryPort::new(output_dir)?;
    let outcome = deliver_photos(&photos, format, params.max_per_batch, &mut port)?;

    let manifest = if with_manifest {
        let manifest = Manifest {
            source: Some(input.display().to_string()),
            generated_at: Utc::now(),
            width: composite.width(),
            height: composite.height(),
            threshold: detection.threshold,
            candidates: detection.candidates,
            format,
            params: params.clone(),
            photocards: port.into_entries(),
        };
        Some(write_manifest(output_dir, &manifest)?)
    } else {
        None
    };

    Ok(TemplateReport {
        input: input.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        width: composite.width(),
        height: composite.height(),
        threshold: detection.threshold,
        candidates: detection.candidates,
        outcome,
        manifest,
    })
}

/// Summary of a directory run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub empty: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Whether the `image` crate recognises the file extension.
pub fn is_template_file(path: &Path) -> bool {
    path.is_file() && image::ImageFormat::from_path(path).is_ok()
}

/// Output subdirectory name for a template: the file stem, or `stem_ext` when
/// another template in the same run shares that stem.
fn template_dir_name(path: &Path, stem_counts: &HashMap<String, usize>) -> Result<String> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| Error::invalid("input", path.display()))?;
    if stem_counts.get(&stem).copied().unwrap_or(0) < 2 {
        return Ok(stem);
    }
    match path.extension() {
        Some(ext) => Ok(format!("{}_{}", stem, ext.to_string_lossy())),
        None => Ok(stem),
    }
}

/// Process every image in `input_dir` (non-recursive), one output
/// subdirectory per template named after the file stem. Templates sharing a
/// stem (`a.png`, `a.bmp`) get the extension appended (`a_png`, `a_bmp`).
pub fn process_directory_to_dir(
    input_dir: &Path,
    output_dir: &Path,
    params: &SegmentParams,
    format: OutputFormat,
    with_manifest: bool,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    std::fs::create_dir_all(output_dir)?;

    let mut inputs: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    inputs.sort();

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for path in inputs.iter().filter(|p| is_template_file(p)) {
        if let Some(stem) = path.file_stem() {
            *stem_counts.entry(stem.to_string_lossy().into_owned()).or_default() += 1;
        }
    }

    let mut report = BatchReport::default();
    for path in inputs {
        if !is_template_file(&path) {
            info!("Skipping non-image entry: {:?}", path);
            report.skipped += 1;
            continue;
        }
        let target = output_dir.join(template_dir_name(&path, &stem_counts)?);

        info!("Processing: {:?} -> {:?}", path, target);
        match process_template_to_dir(&path, &target, params, format, with_manifest) {
            Ok(r) if r.outcome == DeliveryOutcome::NoPhotocards => report.empty += 1,
            Ok(_) => report.processed += 1,
            Err(e) if continue_on_error => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Directory complete: processed={} empty={} skipped={} errors={}",
        report.processed, report.empty, report.skipped, report.errors
    );
    Ok(report)
}
