//! Decode the per-pixel class scores of a tissue segmentation model into a
//! tissue-class map and a confidence-band map, then render both as color
//! images, overlays on the source photo, and label legends.
//!
//! ```no_run
//! use tissue_segmentation::tasks::vision::{InferenceCompletion, InferenceModel, TissueSegmenterBuilder};
//! use tissue_segmentation::tensor::{DenseScores, ScoreLayout};
//!
//! struct Model;
//!
//! impl InferenceModel for Model {
//!     fn run(
//!         &self,
//!         _image: &image::DynamicImage,
//!         completion: InferenceCompletion,
//!     ) -> Result<(), tissue_segmentation::Error> {
//!         let scores = DenseScores::new(ScoreLayout::NHWC, 1, 1, 2, vec![0.2, 0.8])?;
//!         completion.complete(scores);
//!         Ok(())
//!     }
//! }
//!
//! let segmenter = TissueSegmenterBuilder::new().model(Model).finalize().unwrap();
//! let res = segmenter.segment(&image::open("wound.jpg").unwrap()).unwrap();
//! println!("{}", res);
//! ```

mod error;

pub mod palette;
pub mod postprocess;
pub mod tasks;
pub mod tensor;

pub use error::Error;
