#[macro_use]
mod builder;
mod inference;

pub(crate) use builder::BaseTaskBuilder;
pub(crate) use inference::inference_channel;
pub use inference::{InferenceCompletion, InferenceModel, Scores};
