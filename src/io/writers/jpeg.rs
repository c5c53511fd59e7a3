use image::RgbImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::error::{Error, Result};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Encode an RGB photocard as baseline JPEG bytes.
pub fn encode_rgb_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let to_u16 = |side: u32| u16::try_from(side).map_err(|_| Error::invalid("jpeg_dimension", side));
    let cols = to_u16(img.width())?;
    let rows = to_u16(img.height())?;

    let mut bytes = Vec::new();
    let encoder = Encoder::new(&mut bytes, quality);
    encoder
        .encode(img.as_raw(), cols, rows, ColorType::Rgb)
        .map_err(Error::encode)?;
    Ok(bytes)
}
