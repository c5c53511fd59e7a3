use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{AspectRatio, Region};

/// Maximum attachments the delivery channel accepts per message
pub const MAX_FILES_PER_MESSAGE: usize = 9;

/// Segmentation and batching parameters suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentParams {
    /// Reference photocard width/height
    pub aspect_ratio: AspectRatio,
    /// Minimum photocard area, in percent of the whole template
    pub min_area_percentage: f64,
    /// Relative band around the aspect target; 0.2 accepts 0.8x..1.2x
    pub tolerance: f64,
    /// Photocards per delivered batch
    pub max_per_batch: usize,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::default(),
            min_area_percentage: 0.5,
            tolerance: 0.2,
            max_per_batch: MAX_FILES_PER_MESSAGE,
        }
    }
}

impl SegmentParams {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: SegmentParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        let AspectRatio { width, height } = self.aspect_ratio;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::invalid("aspect_ratio", self.aspect_ratio));
        }
        if !self.min_area_percentage.is_finite() || self.min_area_percentage < 0.0 {
            return Err(Error::invalid(
                "min_area_percentage",
                self.min_area_percentage,
            ));
        }
        if !self.tolerance.is_finite() || !(0.0..1.0).contains(&self.tolerance) {
            return Err(Error::invalid("tolerance", self.tolerance));
        }
        if self.max_per_batch == 0 {
            return Err(Error::invalid("max_per_batch", self.max_per_batch));
        }
        Ok(())
    }

    /// Side length a region must reach on both axes: `sqrt(pct / 100 * total_pixels)`.
    pub fn min_size(&self, total_pixels: u64) -> f64 {
        (self.min_area_percentage / 100.0 * total_pixels as f64).sqrt()
    }

    /// Inclusive `(low, high)` bounds on `w / h`.
    pub fn ratio_bounds(&self) -> (f64, f64) {
        let target = self.aspect_ratio.target();
        (target * (1.0 - self.tolerance), target * (1.0 + self.tolerance))
    }

    /// Whether a candidate bounding box passes the aspect and size filters.
    pub fn accepts(&self, region: &Region, total_pixels: u64) -> bool {
        if region.width == 0 || region.height == 0 {
            return false;
        }
        let ratio = region.aspect_ratio();
        let (low, high) = self.ratio_bounds();
        let min_size = self.min_size(total_pixels);
        low <= ratio
            && ratio <= high
            && region.width as f64 >= min_size
            && region.height as f64 >= min_size
    }
}
