use tracing::{debug, info};

use crate::core::composite::{CompositeImage, ExtractedPhoto};
use crate::core::params::SegmentParams;
use crate::core::processing::blur::gaussian_5x5;
use crate::core::processing::contours::find_external_contours;
use crate::core::processing::grayscale::to_luma;
use crate::core::processing::threshold::otsu_binarize_inv;
use crate::error::Result;
use crate::types::Region;

/// Detection-only output of a segmentation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Otsu level chosen on the smoothed luma plane
    pub threshold: u8,
    /// Outer contours found before filtering
    pub candidates: usize,
    /// Accepted regions in discovery order
    pub regions: Vec<Region>,
}

/// Splits a composite template into photocards.
///
/// Stateless apart from its validated parameters; one instance can serve any
/// number of images, from any number of threads.
#[derive(Debug, Clone)]
pub struct Segmenter {
    params: SegmentParams,
}

impl Segmenter {
    pub fn new(params: SegmentParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SegmentParams {
        &self.params
    }

    /// Locate candidate photocard rectangles without copying any pixels.
    ///
    /// luma -> 5x5 Gaussian -> inverted Otsu -> external contours -> bounding
    /// box filter. Output order is contour discovery order, not reading order.
    pub fn detect(&self, image: &CompositeImage) -> Detection {
        let luma = to_luma(image);
        let smoothed = gaussian_5x5(&luma);
        let (threshold, binary) = otsu_binarize_inv(&smoothed);
        let contours = find_external_contours(&binary);

        let total_pixels = image.total_pixels();
        let regions: Vec<Region> = contours
            .iter()
            .map(|c| c.bounding_rect())
            .filter(|r| self.params.accepts(r, total_pixels))
            .collect();

        debug!(
            threshold,
            candidates = contours.len(),
            accepted = regions.len(),
            min_size = self.params.min_size(total_pixels),
            "Segmented {}x{} template",
            image.width(),
            image.height()
        );

        Detection {
            threshold,
            candidates: contours.len(),
            regions,
        }
    }

    /// Copy `regions` out of the original, unfiltered pixels, keeping order.
    pub fn materialize(&self, image: &CompositeImage, regions: &[Region]) -> Vec<ExtractedPhoto> {
        let photos: Vec<ExtractedPhoto> = regions.iter().map(|&region| image.crop(region)).collect();
        info!("Extracted {} photocard(s)", photos.len());
        photos
    }

    /// Detect and crop every accepted region.
    pub fn segment(&self, image: &CompositeImage) -> Vec<ExtractedPhoto> {
        let detection = self.detect(image);
        self.materialize(image, &detection.regions)
    }
}

/// Validate `params` and segment `image` in one call.
pub fn segment(image: &CompositeImage, params: &SegmentParams) -> Result<Vec<ExtractedPhoto>> {
    Ok(Segmenter::new(params.clone())?.segment(image))
}
