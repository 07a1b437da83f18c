mod builder;
mod result;

pub use builder::TissueSegmenterBuilder;
pub use result::TissueSegmenterResult;

use crate::palette::Palette;
use crate::postprocess::utils::vision::{color_buffer, overlay, render_image};
use crate::postprocess::{Activation, Legend, TensorsToSegmentation};
use crate::tasks::common::{inference_channel, InferenceModel, Scores};
use crate::tensor::ScoreTensor;
use crate::Error;
use image::{DynamicImage, GrayImage, RgbaImage};
use std::time::Duration;

/// Performs tissue segmentation on wound images.
pub struct TissueSegmenter {
    model: Box<dyn InferenceModel>,
    tensors_to_segmentation: TensorsToSegmentation,
    class_palette: Palette,
    overlay_alpha: f32,
    inference_timeout: Option<Duration>,
}

impl TissueSegmenter {
    #[inline(always)]
    pub fn activation(&self) -> Activation {
        self.tensors_to_segmentation.activation()
    }

    #[inline(always)]
    pub fn class_palette(&self) -> &Palette {
        &self.class_palette
    }

    #[inline(always)]
    pub fn overlay_alpha(&self) -> f32 {
        self.overlay_alpha
    }

    #[inline(always)]
    pub fn inference_timeout(&self) -> Option<Duration> {
        self.inference_timeout
    }

    /// Run the model on `image` and block until it delivers the scores, fails,
    /// or the inference timeout passes.
    pub fn infer(&self, image: &DynamicImage) -> Result<Scores, Error> {
        let (completion, pending) = inference_channel();
        self.model.run(image, completion)?;
        log::debug!(
            "waiting for scores of `{}x{}` image, timeout {:?}",
            image.width(),
            image.height(),
            self.inference_timeout
        );
        pending.wait(self.inference_timeout)
    }

    /// Segment one image.
    #[inline(always)]
    pub fn segment(&self, image: &DynamicImage) -> Result<TissueSegmenterResult, Error> {
        let scores = self.infer(image)?;
        self.segment_scores(image, &scores)
    }

    /// Decode scores already computed for `image` and render them.
    pub fn segment_scores<T: ScoreTensor + ?Sized>(
        &self,
        image: &DynamicImage,
        scores: &T,
    ) -> Result<TissueSegmenterResult, Error> {
        let maps = self.tensors_to_segmentation.decode(scores)?;

        let (class_image, class_overlay) =
            self.render(image, &maps.category_mask, &self.class_palette)?;
        let class_legend = Legend::from_palette(&maps.class_indices, &self.class_palette)?;

        let (confidence_image, confidence_overlay) =
            self.render(image, &maps.confidence_mask, &Palette::CONFIDENCE)?;
        let confidence_legend = Legend::from_palette(&maps.confidence_indices, &Palette::CONFIDENCE)?;

        Ok(TissueSegmenterResult {
            original_image: image.clone(),
            maps,
            class_image,
            class_overlay,
            class_legend,
            confidence_image,
            confidence_overlay,
            confidence_legend,
        })
    }

    #[inline(always)]
    fn render(
        &self,
        base: &DynamicImage,
        mask: &GrayImage,
        palette: &Palette,
    ) -> Result<(RgbaImage, RgbaImage), Error> {
        let pixels = color_buffer(mask, palette)?;
        let image = render_image(&pixels, mask.width(), mask.height())?;
        let overlay_image = overlay(base, &image, self.overlay_alpha)?;
        Ok((image, overlay_image))
    }
}
