//! Photocard encoders (PNG, JPEG) and the JSON manifest sidecar.
pub mod jpeg;
pub mod manifest;
pub mod png;

use crate::core::composite::ExtractedPhoto;
use crate::error::Result;
use crate::types::{OutputFormat, Region};

/// One photocard ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPhoto {
    /// Zero-based position in extraction order
    pub index: usize,
    pub file_name: String,
    pub region: Region,
    pub bytes: Vec<u8>,
}

/// `photocard_<index>.<ext>`
pub fn photo_file_name(index: usize, format: OutputFormat) -> String {
    format!("photocard_{}.{}", index, format.extension())
}

pub fn encode_photo(photo: &ExtractedPhoto, index: usize, format: OutputFormat) -> Result<EncodedPhoto> {
    let bytes = match format {
        OutputFormat::Png => png::encode_png(&photo.image)?,
        OutputFormat::Jpeg => jpeg::encode_rgb_jpeg(&photo.image, jpeg::DEFAULT_JPEG_QUALITY)?,
    };
    Ok(EncodedPhoto {
        index,
        file_name: photo_file_name(index, format),
        region: photo.region,
        bytes,
    })
}
