//! Garment outline measurement
//!
//! Finds the outer boundary of every connected foreground region, keeps the
//! one enclosing the largest area, and converts its axis-aligned bounding
//! box to centimeters with the calibrated scale.
//!
//! The reported area is the bounding-box product (`width_cm * height_cm`),
//! not the contour's true area.

use crate::calibration::ScaleRatio;
use crate::config::MaskConfig;
use crate::constants::scale;
use crate::detection::ForegroundMask;
use crate::error::{Result, ScanError};
use crate::raster::RasterImage;
use opencv::{
    core::{Point, Rect, Vector},
    imgproc::{bounding_rect, contour_area, find_contours, CHAIN_APPROX_SIMPLE, RETR_EXTERNAL},
};
use serde::{Deserialize, Serialize};

type VectorOfPoint = Vector<Point>;

/// Physical garment dimensions, rounded to 2 decimals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// Bounding box width in centimeters
    pub width_cm: f64,
    /// Bounding box height in centimeters
    pub height_cm: f64,
    /// Bounding box area in square centimeters
    pub area_cm2: f64,
}

impl Measurements {
    /// Convert a pixel bounding box to centimeters
    pub fn from_pixels(width_px: i32, height_px: i32, ratio: ScaleRatio) -> Self {
        let width_cm = ratio.px_to_cm(f64::from(width_px));
        let height_cm = ratio.px_to_cm(f64::from(height_px));
        Self {
            width_cm: round_measurement(width_cm),
            height_cm: round_measurement(height_cm),
            area_cm2: round_measurement(width_cm * height_cm),
        }
    }
}

/// Round to the reported decimals, ties to even
fn round_measurement(value: f64) -> f64 {
    let factor = 10f64.powi(scale::MEASUREMENT_DECIMALS);
    (value * factor).round_ties_even() / factor
}

/// Measures the largest foreground outline of a garment image
#[derive(Debug, Clone)]
pub struct GarmentMeasurer {
    mask_config: MaskConfig,
    default_scale: ScaleRatio,
}

impl Default for GarmentMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl GarmentMeasurer {
    /// Create a measurer with default thresholds and a 3 px/mm fallback scale
    pub fn new() -> Self {
        Self {
            mask_config: MaskConfig::default(),
            default_scale: ScaleRatio::default(),
        }
    }

    /// Create a measurer with custom mask thresholds and fallback scale
    pub fn with_params(mask_config: MaskConfig, default_scale: ScaleRatio) -> Self {
        Self {
            mask_config,
            default_scale,
        }
    }

    /// Measure the garment
    ///
    /// A missing scale is replaced by the fallback scale. An image without
    /// any foreground outline measures all zeros.
    pub fn measure(&self, image: &RasterImage, ratio: Option<ScaleRatio>) -> Result<Measurements> {
        let ratio = ratio.unwrap_or(self.default_scale);
        let mask = ForegroundMask::from_image(image, &self.mask_config)?;

        let Some(bounds) = self.largest_outline_bounds(&mask)? else {
            tracing::warn!("no foreground outline found, reporting zero measurements");
            return Ok(Measurements::default());
        };

        let measurements = Measurements::from_pixels(bounds.width, bounds.height, ratio);
        tracing::debug!(
            width_px = bounds.width,
            height_px = bounds.height,
            %ratio,
            ?measurements,
            "measured garment"
        );
        Ok(measurements)
    }

    /// Bounding box of the external contour enclosing the largest area
    ///
    /// Ties keep the first contour found.
    pub fn largest_outline_bounds(&self, mask: &ForegroundMask) -> Result<Option<Rect>> {
        let mut contours = Vector::<VectorOfPoint>::new();
        find_contours(
            mask.as_mat(),
            &mut contours,
            RETR_EXTERNAL,
            CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )
        .map_err(|e| ScanError::opencv("Contour detection", e))?;

        let mut best: Option<(f64, VectorOfPoint)> = None;
        for contour in contours.iter() {
            let area = contour_area(&contour, false)
                .map_err(|e| ScanError::opencv("Contour area", e))?;
            let is_larger = best.as_ref().map_or(true, |(best_area, _)| area > *best_area);
            if is_larger {
                best = Some((area, contour));
            }
        }

        best.map(|(_, contour)| {
            bounding_rect(&contour).map_err(|e| ScanError::opencv("Bounding rect", e))
        })
        .transpose()
    }
}
