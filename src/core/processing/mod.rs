//! Segmentation stages and the delivery batcher.
pub mod batch;
pub mod blur;
pub mod contours;
pub mod grayscale;
pub mod segment;
pub mod threshold;
