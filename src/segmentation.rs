//! Background segmentation stage
//!
//! The pipeline hands the white-balanced raster to a [`Segmenter`] and
//! expects a raster of compatible layout back, ideally with an alpha channel
//! marking the garment. Segmentation models plug in here without touching
//! the pipeline.

use crate::raster::RasterImage;

/// Background removal capability
pub trait Segmenter: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Separate the garment from its background
    ///
    /// Must be total: a segmenter that cannot isolate the garment returns
    /// its input.
    fn segment(&self, image: RasterImage) -> RasterImage;
}

/// Identity segmenter that returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughSegmenter;

impl Segmenter for PassThroughSegmenter {
    fn name(&self) -> &str {
        "pass-through"
    }

    fn segment(&self, image: RasterImage) -> RasterImage {
        image
    }
}
