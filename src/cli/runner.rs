use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use photocard::{
    DeliveryOutcome, NO_PHOTOCARDS_MESSAGE, OutputFormat, SegmentParams,
    process_directory_to_dir, process_template_to_dir,
};

use super::args::CliArgs;
use super::errors::AppError;

/// Defaults, then the config file, then explicit flags.
pub fn resolve_params(args: &CliArgs) -> Result<SegmentParams, AppError> {
    let mut params = match &args.config {
        Some(path) => SegmentParams::from_json_file(path)?,
        None => SegmentParams::default(),
    };
    if let Some(aspect_ratio) = args.aspect_ratio {
        params.aspect_ratio = aspect_ratio;
    }
    if let Some(min_area) = args.min_area {
        params.min_area_percentage = min_area;
    }
    if let Some(tolerance) = args.tolerance {
        params.tolerance = tolerance;
    }
    if let Some(max_per_batch) = args.max_per_batch {
        params.max_per_batch = max_per_batch;
    }
    params.validate()?;
    Ok(params)
}

fn process_single_template(
    input: &Path,
    output_dir: &Path,
    params: &SegmentParams,
    format: OutputFormat,
    manifest: bool,
) -> Result<(), AppError> {
    let report = process_template_to_dir(input, output_dir, params, format, manifest)?;
    info!(
        "Template {}x{}: threshold={} candidates={}",
        report.width, report.height, report.threshold, report.candidates
    );
    match report.outcome {
        DeliveryOutcome::NoPhotocards => println!("{}", NO_PHOTOCARDS_MESSAGE),
        DeliveryOutcome::Delivered { photos, batches } => println!(
            "Extracted {} photocard(s) in {} batch(es) to {}",
            photos,
            batches,
            output_dir.display()
        ),
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if args.input.is_some() && args.input_dir.is_some() {
        return Err(AppError::ConflictingInputs.into());
    }
    let params = resolve_params(&args)?;
    let output_dir = args.output_dir.clone().ok_or(AppError::MissingArgument {
        arg: "--output-dir".to_string(),
    })?;

    if let Some(input_dir) = &args.input_dir {
        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);
        let report = process_directory_to_dir(
            input_dir,
            &output_dir,
            &params,
            args.format,
            args.manifest,
            args.batch,
        )?;
        println!(
            "Processed: {}  Empty: {}  Skipped: {}  Errors: {}",
            report.processed, report.empty, report.skipped, report.errors
        );
    } else {
        let input = args.input.clone().ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        process_single_template(&input, &output_dir, &params, args.format, args.manifest)?;
    }

    Ok(())
}
