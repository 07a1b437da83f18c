mod tissue_segmentation;

pub use crate::tasks::common::{InferenceCompletion, InferenceModel, Scores};
pub use tissue_segmentation::{TissueSegmenter, TissueSegmenterBuilder, TissueSegmenterResult};
