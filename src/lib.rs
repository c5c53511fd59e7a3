#![doc = r#"
photocard — split scanned photocard templates into individual photocards.

A template is a single composite image with several photocards laid out on a
lighter background. This crate finds each card, crops it out of the original
pixels, and groups the results into delivery batches of at most nine, the
attachment cap of a typical chat message.

Pipeline
--------
1. Luma conversion (BT.601 weights).
2. 5x5 Gaussian smoothing.
3. Global Otsu threshold with inverted polarity: darker than the threshold is
   foreground.
4. Outer contours of the foreground components (holes and anything inside
   them are ignored).
5. Bounding boxes filtered by aspect ratio (default 5.5:8.5, ±20%) and by a
   minimum side length of `sqrt(min_area_percentage / 100 * W * H)`.
6. Crops copied from the untouched source pixels, in contour discovery order.

Known limitation: cards must be darker than the template background. Light
cards on a dark mat binarize as background and are not found.

Quick start
-----------
```rust,no_run
use std::path::Path;
use photocard::{extract_from_path, SegmentParams};

fn main() -> photocard::Result<()> {
    let photos = extract_from_path(Path::new("template.jpg"), &SegmentParams::default())?;
    for photo in &photos {
        println!("{}x{} at {}", photo.width(), photo.height(), photo.region);
    }
    Ok(())
}
```

Delivering in batches
---------------------
```rust
use photocard::{batch, BatchBuilder};

let sizes: Vec<usize> = batch(0..23, 9).unwrap().map(|b| b.len()).collect();
assert_eq!(sizes, vec![9, 9, 5]);

let mut builder = BatchBuilder::new(9).unwrap();
let mut streamed = Vec::new();
for item in 0..23 {
    streamed.extend(builder.push(item).map(|b| b.len()));
}
streamed.extend(builder.finish().map(|b| b.len()));
assert_eq!(streamed, sizes);
```

Error handling
--------------
All fallible functions return `photocard::Result<T>`. An undecodable upload is
`Error::Decode`; finding zero photocards is not an error and is reported as
`DeliveryOutcome::NoPhotocards`.

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — image types, parameters and the processing stages.
- [`io`] — decoding, encoders, manifest sidecar and delivery ports.
- [`types`] — `Region`, `AspectRatio`, `OutputFormat`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Types
pub use core::composite::{CompositeImage, ExtractedPhoto};
pub use core::params::{MAX_FILES_PER_MESSAGE, SegmentParams};
pub use error::{Error, Result};
pub use types::{AspectRatio, OutputFormat, Region};

// Processing
pub use core::processing::batch::{Batch, BatchBuilder, Batches, batch};
pub use core::processing::segment::{Detection, Segmenter, segment};

// I/O
pub use io::{
    DeliveryPort, DirectoryPort, EncodedPhoto, MemoryPort, NO_PHOTOCARDS_MESSAGE,
    decode_composite, open_composite,
};

// High-level API re-exports
pub use api::{
    BatchReport, DeliveryOutcome, TemplateReport, deliver_photos, extract_from_bytes,
    extract_from_path, process_directory_to_dir, process_template_to_dir,
};
