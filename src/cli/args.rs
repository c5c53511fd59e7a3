use clap::Parser;
use std::path::PathBuf;

use photocard::{AspectRatio, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "photocard", version, about = "Split photocard templates into single cards")]
pub struct CliArgs {
    /// Input template image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing template images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output directory; batch mode creates one subdirectory per template
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format for the extracted photocards (png or jpeg)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// JSON file with segmentation parameters; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reference card width:height (default 5.5:8.5)
    #[arg(long)]
    pub aspect_ratio: Option<AspectRatio>,

    /// Minimum card area in percent of the whole template (default 0.5)
    #[arg(long)]
    pub min_area: Option<f64>,

    /// Accepted relative deviation from the aspect ratio (default 0.2)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Photocards per delivered batch (default 9)
    #[arg(long)]
    pub max_per_batch: Option<usize>,

    /// Write a manifest.json next to the photocards
    #[arg(long, default_value_t = false)]
    pub manifest: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: continue with other templates when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}
