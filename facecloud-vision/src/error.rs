//! Error types for image processing

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VisionError>;

#[derive(Debug, Error)]
pub enum VisionError {
    /// The uploaded payload was empty
    #[error("Image payload is empty")]
    EmptyInput,

    /// The payload is not a supported image
    #[error("Failed to decode image: {0}")]
    Decode(image::ImageError),

    /// The result could not be encoded
    #[error("Failed to encode image: {0}")]
    Encode(image::ImageError),

    /// No pixel was classified as skin
    #[error("No skin detected in image")]
    NoSkin,
}

impl VisionError {
    /// Whether the error was caused by the input rather than by the service
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Encode(_))
    }
}
