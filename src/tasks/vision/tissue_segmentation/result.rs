use crate::postprocess::{Legend, SegmentationMaps};
use crate::Error;
use image::{DynamicImage, RgbaImage};
use std::fmt::{Display, Formatter};
use std::path::Path;

/// The output result of the tissue segmentation task.
#[derive(Debug, Clone)]
pub struct TissueSegmenterResult {
    /// The photo the scores were computed for.
    pub original_image: DynamicImage,

    /// The decoded category and confidence masks, at model output resolution.
    pub maps: SegmentationMaps,

    /// The category mask colored with the class palette.
    pub class_image: RgbaImage,

    /// `class_image` drawn over the original photo, at photo resolution.
    pub class_overlay: RgbaImage,

    /// Label to color for every tissue class present in the image.
    pub class_legend: Legend,

    /// The confidence mask colored with the confidence palette.
    pub confidence_image: RgbaImage,

    /// `confidence_image` drawn over the original photo, at photo resolution.
    pub confidence_overlay: RgbaImage,

    /// Label to color for every confidence band present in the image.
    pub confidence_legend: Legend,
}

impl TissueSegmenterResult {
    pub const CLASS_IMAGE_FILE: &'static str = "class.png";
    pub const CLASS_OVERLAY_FILE: &'static str = "class_overlay.png";
    pub const CLASS_MAP_FILE: &'static str = "class_map.png";
    pub const CONFIDENCE_IMAGE_FILE: &'static str = "confidence.png";
    pub const CONFIDENCE_OVERLAY_FILE: &'static str = "confidence_overlay.png";
    pub const CONFIDENCE_MAP_FILE: &'static str = "confidence_map.png";

    /// Write the generated images as PNG files into the existing directory `dir`.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<(), Error> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("`{}` is not a directory", dir.display()),
            )));
        }

        self.class_image.save(dir.join(Self::CLASS_IMAGE_FILE))?;
        self.class_overlay.save(dir.join(Self::CLASS_OVERLAY_FILE))?;
        self.maps
            .category_mask
            .save(dir.join(Self::CLASS_MAP_FILE))?;
        self.confidence_image
            .save(dir.join(Self::CONFIDENCE_IMAGE_FILE))?;
        self.confidence_overlay
            .save(dir.join(Self::CONFIDENCE_OVERLAY_FILE))?;
        self.maps
            .confidence_mask
            .save(dir.join(Self::CONFIDENCE_MAP_FILE))?;
        log::debug!("saved segmentation images to `{}`", dir.display());
        Ok(())
    }
}

impl Display for TissueSegmenterResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "TissueSegmenterResult:")?;
        writeln!(
            f,
            "  image size: {}x{}",
            self.original_image.width(),
            self.original_image.height()
        )?;
        writeln!(f, "  map size: {}x{}", self.maps.width(), self.maps.height())?;
        writeln!(f, "  class legend:")?;
        write!(f, "{}", self.class_legend)?;
        writeln!(f, "  confidence legend:")?;
        write!(f, "{}", self.confidence_legend)
    }
}
