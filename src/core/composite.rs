use image::{Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::types::Region;

/// The scanned template: an immutable RGB8 raster.
///
/// Channel order is RGB as produced by the `image` decoders and is kept
/// unchanged through every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeImage {
    rgb: RgbImage,
}

impl CompositeImage {
    pub fn from_rgb(rgb: RgbImage) -> Self {
        Self { rgb }
    }

    /// Build from an interleaved RGB8 buffer of exactly `width * height * 3` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let len = data.len();
        RgbImage::from_raw(width, height, data)
            .map(Self::from_rgb)
            .ok_or_else(|| {
                Error::invalid(
                    "raw_buffer",
                    format!("{len} bytes for {width}x{height} RGB8"),
                )
            })
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    pub fn total_pixels(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.rgb.get_pixel(x, y).0
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.rgb
    }

    /// Copy the pixels under `region` into an independent photo.
    pub(crate) fn crop(&self, region: Region) -> ExtractedPhoto {
        let image = image::imageops::crop_imm(
            &self.rgb,
            region.x,
            region.y,
            region.width,
            region.height,
        )
        .to_image();
        ExtractedPhoto { region, image }
    }
}

impl From<RgbImage> for CompositeImage {
    fn from(rgb: RgbImage) -> Self {
        Self::from_rgb(rgb)
    }
}

/// One photocard cut out of a composite; owns its pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPhoto {
    pub region: Region,
    pub image: RgbImage,
}

impl ExtractedPhoto {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_checks_buffer_length() {
        assert!(CompositeImage::from_raw(2, 2, vec![0; 12]).is_ok());
        let err = CompositeImage::from_raw(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "raw_buffer", .. }));
    }

    #[test]
    fn crop_copies_exact_sub_block() {
        let rgb = RgbImage::from_fn(6, 4, |x, y| Rgb([x as u8, y as u8, (x * y) as u8]));
        let composite = CompositeImage::from_rgb(rgb);
        let photo = composite.crop(Region::new(2, 1, 3, 2));
        assert_eq!((photo.width(), photo.height()), (3, 2));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(photo.pixel(x, y).0, composite.pixel(x + 2, y + 1));
            }
        }
    }
}
