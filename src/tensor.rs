//! Read-only accessors over the class score tensor produced by a segmentation model.

use crate::postprocess::{Dequantize, QuantizationParameters};
use crate::Error;

/// A `width x height x classes` view of per-pixel class scores.
///
/// Implemented by inference backends; the decoder only ever reads through it.
pub trait ScoreTensor {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn class_count(&self) -> usize;

    /// Score of `class` at column `x`, row `y`, or `None` when the coordinate
    /// is out of range or the value cannot be read.
    fn score(&self, x: u32, y: u32, class: usize) -> Option<f32>;
}

impl<T: ScoreTensor + ?Sized> ScoreTensor for Box<T> {
    #[inline(always)]
    fn width(&self) -> u32 {
        (**self).width()
    }

    #[inline(always)]
    fn height(&self) -> u32 {
        (**self).height()
    }

    #[inline(always)]
    fn class_count(&self) -> usize {
        (**self).class_count()
    }

    #[inline(always)]
    fn score(&self, x: u32, y: u32, class: usize) -> Option<f32> {
        (**self).score(x, y, class)
    }
}

/// Data layout in memory for a score tensor with batch size 1. ```NHWC```, ```NCHW```.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone)]
pub enum ScoreLayout {
    /// class is the innermost axis: `(y * width + x) * classes + class`
    NHWC,
    /// one plane per class: `class * height * width + y * width + x`
    NCHW,
}

/// Score tensor over a flat `f32` model output buffer.
#[derive(Debug, Clone)]
pub struct DenseScores {
    layout: ScoreLayout,
    width: u32,
    height: u32,
    classes: usize,
    data: Vec<f32>,
}

impl DenseScores {
    pub fn new(
        layout: ScoreLayout,
        width: u32,
        height: u32,
        classes: usize,
        data: Vec<f32>,
    ) -> Result<Self, Error> {
        let expect = (width as usize)
            .checked_mul(height as usize)
            .and_then(|hw| hw.checked_mul(classes))
            .ok_or_else(|| {
                Error::ModelInconsistentError(format!(
                    "Score tensor shape `{}x{}x{}` overflows",
                    width, height, classes
                ))
            })?;
        if data.len() != expect {
            return Err(Error::ModelInconsistentError(format!(
                "Expect score tensor element count `{}` for shape `{}x{}x{}`, but got `{}`",
                expect,
                width,
                height,
                classes,
                data.len()
            )));
        }
        Ok(Self {
            layout,
            width,
            height,
            classes,
            data,
        })
    }

    /// Build from a uint8 quantized model output.
    pub fn from_quantized(
        layout: ScoreLayout,
        width: u32,
        height: u32,
        classes: usize,
        data: &[u8],
        quantization_parameters: QuantizationParameters,
    ) -> Result<Self, Error> {
        Self::new(
            layout,
            width,
            height,
            classes,
            data.dequantize(quantization_parameters),
        )
    }

    #[inline(always)]
    pub fn layout(&self) -> ScoreLayout {
        self.layout
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[f32] {
        self.data.as_slice()
    }

    #[inline(always)]
    fn offset(&self, x: u32, y: u32, class: usize) -> usize {
        let (w, h) = (self.width as usize, self.height as usize);
        let (x, y) = (x as usize, y as usize);
        match self.layout {
            ScoreLayout::NHWC => (y * w + x) * self.classes + class,
            ScoreLayout::NCHW => class * h * w + y * w + x,
        }
    }
}

impl ScoreTensor for DenseScores {
    #[inline(always)]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    fn class_count(&self) -> usize {
        self.classes
    }

    #[inline]
    fn score(&self, x: u32, y: u32, class: usize) -> Option<f32> {
        if x >= self.width || y >= self.height || class >= self.classes {
            return None;
        }
        self.data.get(self.offset(x, y, class)).copied()
    }
}
