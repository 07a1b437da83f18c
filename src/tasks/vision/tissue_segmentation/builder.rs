use super::TissueSegmenter;
use crate::palette::Palette;
use crate::postprocess::{Activation, TensorsToSegmentation};
use crate::tasks::common::BaseTaskBuilder;

/// Configure the properties of a new tissue segmentation task.
/// Methods can be chained on it in order to configure it.
pub struct TissueSegmenterBuilder {
    pub(super) base_task_builder: BaseTaskBuilder,

    pub(super) activation: Activation,

    /// Opacity of the class and confidence images drawn over the photo.
    pub(super) overlay_alpha: f32,

    pub(super) class_palette: Palette,
}

impl Default for TissueSegmenterBuilder {
    #[inline(always)]
    fn default() -> Self {
        Self {
            base_task_builder: Default::default(),
            activation: Activation::None,
            overlay_alpha: Self::DEFAULT_OVERLAY_ALPHA,
            class_palette: Palette::TISSUE,
        }
    }
}

impl TissueSegmenterBuilder {
    pub const DEFAULT_OVERLAY_ALPHA: f32 = 0.5;

    #[inline(always)]
    pub fn new() -> Self {
        Default::default()
    }

    base_builder_impl!();

    /// Activation applied to each pixel's class scores before the argmax.
    /// default is [`Activation::None`].
    #[inline(always)]
    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Must in range [0, 1], default is 0.5.
    #[inline(always)]
    pub fn overlay_alpha(mut self, overlay_alpha: f32) -> Self {
        self.overlay_alpha = overlay_alpha;
        self
    }

    /// Palette for the tissue classes, the model must not output more classes
    /// than it holds. default is [`Palette::TISSUE`].
    #[inline(always)]
    pub fn class_palette(mut self, class_palette: Palette) -> Self {
        self.class_palette = class_palette;
        self
    }

    #[inline]
    pub fn finalize(mut self) -> Result<TissueSegmenter, crate::Error> {
        if !(0. ..=1.).contains(&self.overlay_alpha) {
            return Err(crate::Error::ArgumentError(format!(
                "Overlay alpha must in range [0, 1], but got `{}`",
                self.overlay_alpha
            )));
        }
        if self.class_palette.is_empty() {
            return Err(crate::Error::ArgumentError(
                "Class palette must not be empty".into(),
            ));
        }
        if !self.class_palette.has_unique_labels() {
            return Err(crate::Error::ArgumentError(
                "Class palette labels must be unique".into(),
            ));
        }
        let model = base_task_builder_check_and_get_model!(self);

        Ok(TissueSegmenter {
            model,
            tensors_to_segmentation: TensorsToSegmentation::new(self.activation)
                .with_class_palette(&self.class_palette),
            class_palette: self.class_palette,
            overlay_alpha: self.overlay_alpha,
            inference_timeout: self.base_task_builder.inference_timeout,
        })
    }
}
