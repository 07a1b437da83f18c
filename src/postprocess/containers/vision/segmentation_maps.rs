use image::{GrayImage, Luma};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

/// The two label maps produced by one decode pass over a score tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationMaps {
    /// A category mask in GRAY8 format where each pixel is the index of the
    /// highest scoring tissue class at that position.
    pub category_mask: GrayImage,

    /// The distinct class indices present in `category_mask`.
    pub class_indices: BTreeSet<u8>,

    /// A GRAY8 mask where each pixel is the confidence band, in `[0, 10)`, of
    /// the winning class score.
    pub confidence_mask: GrayImage,

    /// The distinct band indices present in `confidence_mask`.
    pub confidence_indices: BTreeSet<u8>,
}

impl SegmentationMaps {
    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.category_mask.width()
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.category_mask.height()
    }

    #[inline]
    pub fn class_at(&self, x: u32, y: u32) -> Option<u8> {
        mask_value(&self.category_mask, x, y)
    }

    #[inline]
    pub fn confidence_at(&self, x: u32, y: u32) -> Option<u8> {
        mask_value(&self.confidence_mask, x, y)
    }

    /// Pixel count for every class present in the category mask.
    pub fn class_histogram(&self) -> BTreeMap<u8, usize> {
        let mut histogram = BTreeMap::new();
        for Luma([c]) in self.category_mask.pixels() {
            *histogram.entry(*c).or_insert(0) += 1;
        }
        histogram
    }
}

#[inline(always)]
fn mask_value(mask: &GrayImage, x: u32, y: u32) -> Option<u8> {
    if x < mask.width() && y < mask.height() {
        Some(mask.get_pixel(x, y)[0])
    } else {
        None
    }
}

impl Display for SegmentationMaps {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SegmentationMaps:")?;
        writeln!(f, "  size: {}x{}", self.width(), self.height())?;
        writeln!(f, "  class indices: {:?}", self.class_indices)?;
        writeln!(f, "  confidence indices: {:?}", self.confidence_indices)
    }
}
