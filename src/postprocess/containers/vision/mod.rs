mod legend;
mod segmentation_maps;

pub use legend::*;
pub use segmentation_maps::*;
