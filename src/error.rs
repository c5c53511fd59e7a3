//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Wraps decode, I/O, and manifest serialization failures, and provides semantic
//! variants for argument validation and delivery failures. An empty segmentation
//! result is not an error; see `api::DeliveryOutcome`.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode template image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to encode photocard: {0}")]
    Encode(String),

    #[error("Manifest error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl Error {
    pub fn invalid<V: std::fmt::Display>(arg: &'static str, value: V) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }

    pub fn encode<E: std::fmt::Display>(e: E) -> Self {
        Error::Encode(e.to_string())
    }

    pub fn delivery<E: std::fmt::Display>(e: E) -> Self {
        Error::Delivery(e.to_string())
    }
}
