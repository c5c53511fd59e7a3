use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Use either --input or --input-dir, not both")]
    ConflictingInputs,

    #[error(transparent)]
    Photocard(#[from] photocard::Error),
}
