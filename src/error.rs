use std::time::Duration;

/// Tissue segmentation API error enum.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image Error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Argument Error: {0}")]
    ArgumentError(String),

    #[error("Tensor Read Error: cannot read score at x `{x}`, y `{y}`, class `{class}`")]
    TensorReadError { x: u32, y: u32, class: usize },

    #[error("Invalid Pixel Data: {0}")]
    InvalidPixelData(String),

    #[error("Model Initialization Error: {0}")]
    ModelInitializationError(String),

    #[error("Model Inconsistent Error: {0}")]
    ModelInconsistentError(String),

    #[error("Inference Error: {0}")]
    InferenceError(String),

    #[error("Inference Timeout: no scores delivered within `{0:?}`")]
    InferenceTimeout(Duration),
}
