//! Core building blocks: the composite/photo image types, segmentation
//! parameters, and the processing stages (luma, smoothing, Otsu binarization,
//! contour discovery, bounding-box filtering, batching). These are the
//! primitives consumed by the high-level `api` module.
pub mod composite;
pub mod params;
pub mod processing;
