use std::path::Path;

use tracing::debug;

use crate::core::composite::CompositeImage;
use crate::error::Result;

/// Decode an uploaded template (any format the `image` crate reads) to RGB8.
pub fn decode_composite(bytes: &[u8]) -> Result<CompositeImage> {
    let decoded = image::load_from_memory(bytes)?;
    debug!(
        "Decoded template: {}x{} {:?} ({} bytes)",
        decoded.width(),
        decoded.height(),
        decoded.color(),
        bytes.len()
    );
    Ok(CompositeImage::from_rgb(decoded.to_rgb8()))
}

/// Read a template from disk and decode it.
pub fn open_composite(path: &Path) -> Result<CompositeImage> {
    let bytes = std::fs::read(path)?;
    decode_composite(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::io::writers::png::encode_png;
    use image::{Rgb, RgbImage};

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_composite(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "got {err:?}");
    }

    #[test]
    fn png_bytes_decode_to_same_pixels() {
        let rgb = RgbImage::from_fn(7, 5, |x, y| Rgb([x as u8 * 30, y as u8 * 40, 9]));
        let bytes = encode_png(&rgb).unwrap();
        let composite = decode_composite(&bytes).unwrap();
        assert_eq!(composite.as_rgb(), &rgb);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = open_composite(Path::new("/nonexistent/template.png")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
