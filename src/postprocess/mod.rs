/// result containers
mod containers;
pub use containers::*;

/// stateless operators for tensor
mod ops;
pub use ops::{confidence_bucket, QuantizationParameters, CONFIDENCE_BANDS};
pub(crate) use ops::{Dequantize, Softmax};

/// stateful objects, convert tensor to results
mod processing;
pub use processing::*;

/// utils to use the results, such as draw_utils
pub mod utils;

/// Activation applied to the class scores of each pixel to pick its confidence band.
/// The class argmax always runs on the raw scores.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Activation {
    /// Compare the raw model scores.
    #[default]
    None,
    /// Softmax across the class axis. The winning class is unchanged, the
    /// confidence band follows the normalized score.
    Softmax,
}
