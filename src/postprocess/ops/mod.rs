mod confidence;
mod dequantize;
mod softmax;

pub use confidence::{confidence_bucket, CONFIDENCE_BANDS};
pub use dequantize::QuantizationParameters;
pub(crate) use dequantize::Dequantize;
pub(crate) use softmax::Softmax;
