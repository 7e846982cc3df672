//! Skin tone estimation from a face photo
//!
//! A heuristic stand-in for a trained classifier: the face is assumed to fill
//! the center of the frame, so the average color of the central half (in both
//! directions) is taken as the skin color. Luminance picks one of four tone
//! bands and the red/blue balance picks the undertone.

use crate::codec::ImageCodec;
use crate::color::ColorSample;
use crate::constants::skin_tone;
use crate::error::{Result, ScanError};
use crate::raster::RasterImage;
use opencv::{
    core::{self, Mat, Rect},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// Luminance band of a skin color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkinToneClass {
    Light,
    Medium,
    Deep,
    #[serde(rename = "Very Deep")]
    VeryDeep,
}

impl SkinToneClass {
    /// Band for a Rec. 601 luminance value
    pub fn from_luminance(luminance: f64) -> Self {
        if luminance > skin_tone::LIGHT_LUMINANCE {
            SkinToneClass::Light
        } else if luminance > skin_tone::MEDIUM_LUMINANCE {
            SkinToneClass::Medium
        } else if luminance > skin_tone::DEEP_LUMINANCE {
            SkinToneClass::Deep
        } else {
            SkinToneClass::VeryDeep
        }
    }
}

/// Undertone from the red/blue balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Undertone {
    Warm,
    Cool,
    Neutral,
}

impl Undertone {
    pub fn from_rgb(red: u8, blue: u8) -> Self {
        match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Undertone::Warm,
            std::cmp::Ordering::Less => Undertone::Cool,
            std::cmp::Ordering::Equal => Undertone::Neutral,
        }
    }
}

/// Palettes offered with every analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRecommendations {
    pub warm_colors: Vec<String>,
    pub cool_colors: Vec<String>,
}

impl Default for ColorRecommendations {
    fn default() -> Self {
        Self {
            warm_colors: skin_tone::WARM_RECOMMENDATIONS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            cool_colors: skin_tone::COOL_RECOMMENDATIONS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Result of a skin tone analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinToneReport {
    pub skin_tone_class: SkinToneClass,
    pub undertone: Undertone,
    /// Average skin color as lowercase `#rrggbb`
    pub hex_color: String,
    pub recommendations: ColorRecommendations,
}

/// Estimates skin tone from the center of a photo
#[derive(Debug, Clone, Default)]
pub struct SkinToneAnalyzer {
    codec: ImageCodec,
}

impl SkinToneAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a photo and analyze it
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidImage` for empty or undecodable bytes.
    pub fn analyze(&self, bytes: &[u8]) -> Result<SkinToneReport> {
        let image = self.codec.decode(bytes)?;
        self.analyze_image(&image)
    }

    /// Analyze an already decoded photo
    pub fn analyze_image(&self, image: &RasterImage) -> Result<SkinToneReport> {
        let [red, green, blue] = self.average_center_color(image)?;
        let luminance =
            0.299 * f64::from(red) + 0.587 * f64::from(green) + 0.114 * f64::from(blue);

        let report = SkinToneReport {
            skin_tone_class: SkinToneClass::from_luminance(luminance),
            undertone: Undertone::from_rgb(red, blue),
            hex_color: ColorSample::new(red, green, blue).to_hex(),
            recommendations: ColorRecommendations::default(),
        };
        tracing::debug!(
            luminance,
            class = ?report.skin_tone_class,
            undertone = ?report.undertone,
            "analyzed skin tone"
        );
        Ok(report)
    }

    /// Mean color of rows `[h/4, 3h/4)` and columns `[w/4, 3w/4)`,
    /// truncated to integers, in R, G, B order
    ///
    /// Images too small to have a central region are averaged whole.
    pub fn average_center_color(&self, image: &RasterImage) -> Result<[u8; 3]> {
        let (width, height) = (image.width() as i32, image.height() as i32);
        let region = Self::center_region(width, height);

        let mean = match region {
            Some(rect) => {
                let center = Mat::roi(image.as_mat(), rect)
                    .map_err(|e| ScanError::opencv("Center region ROI", e))?
                    .try_clone()
                    .map_err(|e| ScanError::opencv("Center region copy", e))?;
                core::mean(&center, &Mat::default())
            }
            None => core::mean(image.as_mat(), &Mat::default()),
        }
        .map_err(|e| ScanError::opencv("Center region mean", e))?;

        // BGR order; `as` saturates and truncates toward zero
        Ok([mean[2] as u8, mean[1] as u8, mean[0] as u8])
    }

    fn center_region(width: i32, height: i32) -> Option<Rect> {
        let (x0, x1) = (width / 4, 3 * width / 4);
        let (y0, y1) = (height / 4, 3 * height / 4);
        (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}
