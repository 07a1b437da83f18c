use crate::postprocess::{confidence_bucket, Activation, SegmentationMaps, Softmax};
use crate::tensor::ScoreTensor;
use crate::Error;

mod tensors_to_segmentation;

pub use tensors_to_segmentation::*;
