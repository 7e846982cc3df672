//! White balance correction from a user-marked reference patch
//!
//! The user taps a region that should read neutral white (paper, a white
//! card). The mean of each color channel over a square window around the tap
//! gives per-channel gains that map the patch to pure white.

use crate::config::WhiteBalanceConfig;
use crate::constants::white_balance;
use crate::error::{Result, ScanError};
use crate::raster::RasterImage;
use opencv::{
    core::{self, Mat, Rect},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// Reference patch marked by the user
///
/// Mirrors the `{x, y, radius}` object sent by the client. Coordinates are
/// truncated to whole pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhitePatch {
    /// Patch center column
    #[serde(default)]
    pub x: f64,
    /// Patch center row
    #[serde(default)]
    pub y: f64,
    /// Half the side of the sampling square
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_radius() -> f64 {
    white_balance::DEFAULT_RADIUS
}

impl Default for WhitePatch {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            radius: default_radius(),
        }
    }
}

impl WhitePatch {
    /// Patch centered at (x, y) with the given radius
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }
}

/// Per-channel multipliers, in R, G, B order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelGains {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Rescales color channels so the reference patch reads neutral white
#[derive(Debug, Clone)]
pub struct WhiteBalanceCorrector {
    enabled: bool,
    epsilon: f64,
}

impl Default for WhiteBalanceCorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl WhiteBalanceCorrector {
    /// Create a corrector with default settings
    pub fn new() -> Self {
        Self::from_config(&WhiteBalanceConfig::default())
    }

    /// Create a corrector from configuration
    pub fn from_config(config: &WhiteBalanceConfig) -> Self {
        Self {
            enabled: config.enabled,
            epsilon: config.epsilon,
        }
    }

    /// Sampling window for a patch, or `None` if it leaves the image
    ///
    /// The window spans rows `[y-r, y+r)` and columns `[x-r, x+r)`. It is
    /// accepted only when `r > 0`, `x-r >= 0`, `y-r >= 0`, `x+r < width`
    /// and `y+r < height`. Coordinates too large to represent are out of
    /// bounds.
    pub fn sample_window(&self, image: &RasterImage, patch: &WhitePatch) -> Option<Rect> {
        let x = patch.x as i64;
        let y = patch.y as i64;
        let r = patch.radius as i64;
        let width = i64::from(image.width());
        let height = i64::from(image.height());

        let left = x.checked_sub(r)?;
        let top = y.checked_sub(r)?;
        let right = x.checked_add(r)?;
        let bottom = y.checked_add(r)?;
        if r <= 0 || left < 0 || top < 0 || right >= width || bottom >= height {
            return None;
        }

        // right < width keeps every edge inside i32
        let side = (right - left) as i32;
        Some(Rect::new(left as i32, top as i32, side, side))
    }

    /// Gains mapping the patch mean to white, or `None` if the patch is out of bounds
    pub fn channel_gains(&self, image: &RasterImage, patch: &WhitePatch) -> Result<Option<ChannelGains>> {
        let Some(window) = self.sample_window(image, patch) else {
            return Ok(None);
        };

        let region = Mat::roi(image.as_mat(), window)
            .map_err(|e| ScanError::opencv("White patch ROI", e))?
            .try_clone()
            .map_err(|e| ScanError::opencv("White patch copy", e))?;
        let mean = core::mean(&region, &Mat::default())
            .map_err(|e| ScanError::opencv("White patch mean", e))?;

        // BGR order
        let gain = |channel_mean: f64| white_balance::TARGET_WHITE / (channel_mean + self.epsilon);
        Ok(Some(ChannelGains {
            blue: gain(mean[0]),
            green: gain(mean[1]),
            red: gain(mean[2]),
        }))
    }

    /// Apply white balance correction
    ///
    /// Returns the input unchanged when correction is disabled or the
    /// sampling window would cross an image edge. Scaled values are clamped
    /// to [0, 255] and truncated; an alpha channel passes through untouched.
    pub fn correct(&self, image: RasterImage, patch: &WhitePatch) -> Result<RasterImage> {
        if !self.enabled {
            return Ok(image);
        }

        let Some(gains) = self.channel_gains(&image, patch)? else {
            tracing::warn!(
                x = patch.x,
                y = patch.y,
                radius = patch.radius,
                width = image.width(),
                height = image.height(),
                "white patch outside image, skipping white balance"
            );
            return Ok(image);
        };
        tracing::debug!(?gains, "white balance gains");

        let bgr_gains = [gains.blue, gains.green, gains.red];
        let channels = image.channels();
        let mut mat = image.into_mat();
        if !mat.is_continuous() {
            mat = mat
                .try_clone()
                .map_err(|e| ScanError::opencv("Mat clone", e))?;
        }
        let bytes = mat
            .data_bytes_mut()
            .map_err(|e| ScanError::opencv("Mat data access", e))?;
        for px in bytes.chunks_exact_mut(channels) {
            // Only the color channels; alpha sits at index 3
            for (value, gain) in px.iter_mut().zip(bgr_gains) {
                *value = scale_channel(*value, gain);
            }
        }

        RasterImage::from_mat(mat)
    }
}

/// Scale one channel value, clamping to [0, 255] and truncating toward zero
fn scale_channel(value: u8, gain: f64) -> u8 {
    (f64::from(value) * gain).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_rgb(width: u32, height: u32, rgb: [u8; 3]) -> RasterImage {
        RasterImage::from_rgb8(width, height, &rgb.repeat((width * height) as usize)).unwrap()
    }

    fn is_unchanged(before: &RasterImage, after: &RasterImage) -> bool {
        before.data().unwrap() == after.data().unwrap()
    }

    #[test]
    fn test_patch_maps_to_white() {
        let image = uniform_rgb(20, 20, [200, 100, 50]);
        let corrector = WhiteBalanceCorrector::new();
        let patch = WhitePatch::new(10.0, 10.0, 4.0);

        let gains = corrector.channel_gains(&image, &patch).unwrap().unwrap();
        assert!((gains.red - 1.275).abs() < 1e-6);
        assert!((gains.green - 2.55).abs() < 1e-6);
        assert!((gains.blue - 5.1).abs() < 1e-6);

        // The epsilon keeps every product just under 255, which truncates to 254
        let corrected = corrector.correct(image, &patch).unwrap();
        assert_eq!(corrected.rgb_at(0, 0).unwrap(), [254, 254, 254]);
        assert_eq!(corrected.rgb_at(19, 19).unwrap(), [254, 254, 254]);
    }

    #[test]
    fn test_rest_of_image_is_scaled() {
        // Left half reads (250, 250, 250) under the patch, right half is darker
        let mut data = Vec::new();
        for _y in 0..10 {
            for x in 0..20 {
                if x < 10 {
                    data.extend_from_slice(&[250, 250, 250]);
                } else {
                    data.extend_from_slice(&[100, 50, 200]);
                }
            }
        }
        let image = RasterImage::from_rgb8(20, 10, &data).unwrap();
        let corrected = WhiteBalanceCorrector::new()
            .correct(image, &WhitePatch::new(4.0, 4.0, 3.0))
            .unwrap();

        assert_eq!(corrected.rgb_at(0, 0).unwrap(), [254, 254, 254]);
        // 100 * 1.02 = 101.99999..., truncated
        assert_eq!(corrected.rgb_at(15, 5).unwrap(), [101, 50, 203]);
    }

    #[test]
    fn test_boundary_touching_top_left_edge_is_in_bounds() {
        let image = uniform_rgb(10, 10, [128, 128, 128]);
        let corrector = WhiteBalanceCorrector::new();
        // x - r == 0 and y - r == 0
        assert!(corrector.sample_window(&image, &WhitePatch::new(2.0, 2.0, 2.0)).is_some());
        // x + r == width - 1
        assert!(corrector.sample_window(&image, &WhitePatch::new(7.0, 7.0, 2.0)).is_some());
    }

    #[test]
    fn test_boundary_past_edge_is_noop() {
        let corrector = WhiteBalanceCorrector::new();
        let patches = [
            WhitePatch::new(8.0, 5.0, 2.0), // x + r == width
            WhitePatch::new(5.0, 8.0, 2.0), // y + r == height
            WhitePatch::new(1.0, 5.0, 2.0), // x - r < 0
            WhitePatch::new(5.0, 1.0, 2.0), // y - r < 0
            WhitePatch::new(5.0, 5.0, 6.0), // larger than image
        ];
        for patch in patches {
            let image = uniform_rgb(10, 10, [90, 120, 150]);
            let reference = image.try_clone().unwrap();
            assert!(corrector.sample_window(&image, &patch).is_none(), "{:?}", patch);
            let out = corrector.correct(image, &patch).unwrap();
            assert!(is_unchanged(&reference, &out), "{:?}", patch);
        }
    }

    #[test]
    fn test_extreme_coordinates_are_out_of_bounds() {
        let corrector = WhiteBalanceCorrector::new();
        let patches = [
            WhitePatch::new(1e19, 1e19, 1e19),
            WhitePatch::new(-1e19, -1e19, 1e19),
            WhitePatch::new(f64::MAX, 5.0, f64::MAX),
            WhitePatch::new(5.0, 5.0, f64::INFINITY),
            WhitePatch::new(f64::NAN, f64::NAN, f64::NAN),
        ];
        for patch in patches {
            let image = uniform_rgb(10, 10, [90, 120, 150]);
            let reference = image.try_clone().unwrap();
            assert!(corrector.sample_window(&image, &patch).is_none(), "{:?}", patch);
            let out = corrector.correct(image, &patch).unwrap();
            assert!(is_unchanged(&reference, &out), "{:?}", patch);
        }
    }

    #[test]
    fn test_scale_channel_truncates() {
        assert_eq!(scale_channel(120, 255.0 / (200.0 + 1e-5)), 152);
        assert_eq!(scale_channel(200, 255.0 / 200.0), 255);
        assert_eq!(scale_channel(1, 2.55e7), 255);
        assert_eq!(scale_channel(0, 2.55e7), 0);
    }

    #[test]
    fn test_zero_radius_is_noop() {
        let image = uniform_rgb(10, 10, [90, 120, 150]);
        let reference = image.try_clone().unwrap();
        let out = WhiteBalanceCorrector::new()
            .correct(image, &WhitePatch::new(0.0, 0.0, 0.0))
            .unwrap();
        assert!(is_unchanged(&reference, &out));
    }

    #[test]
    fn test_disabled_corrector_is_noop() {
        let config = WhiteBalanceConfig {
            enabled: false,
            ..WhiteBalanceConfig::default()
        };
        let image = uniform_rgb(10, 10, [90, 120, 150]);
        let reference = image.try_clone().unwrap();
        let out = WhiteBalanceCorrector::from_config(&config)
            .correct(image, &WhitePatch::new(5.0, 5.0, 2.0))
            .unwrap();
        assert!(is_unchanged(&reference, &out));
    }

    #[test]
    fn test_black_patch_does_not_divide_by_zero() {
        let mut data = vec![0u8; 10 * 10 * 3];
        // One bright pixel away from the patch
        data[(9 * 10 + 9) * 3] = 1;
        let image = RasterImage::from_rgb8(10, 10, &data).unwrap();
        let out = WhiteBalanceCorrector::new()
            .correct(image, &WhitePatch::new(3.0, 3.0, 2.0))
            .unwrap();
        assert_eq!(out.rgb_at(3, 3).unwrap(), [0, 0, 0]);
        assert_eq!(out.rgb_at(9, 9).unwrap(), [255, 0, 0]);
    }

    #[test]
    fn test_alpha_passes_through() {
        let data = [200u8, 100, 50, 77].repeat(100);
        let image = RasterImage::from_rgba8(10, 10, &data).unwrap();
        let out = WhiteBalanceCorrector::new()
            .correct(image, &WhitePatch::new(5.0, 5.0, 2.0))
            .unwrap();
        assert_eq!(out.channels(), 4);
        assert_eq!(out.rgb_at(1, 1).unwrap(), [254, 254, 254]);
        assert_eq!(out.alpha_at(1, 1).unwrap(), Some(77));
    }

    #[test]
    fn test_patch_from_client_json_defaults_radius() {
        let patch: WhitePatch = serde_json::from_str(r#"{"x": 12.7, "y": 40}"#).unwrap();
        assert_eq!(patch.radius, 30.0);
        let image = uniform_rgb(100, 100, [1, 1, 1]);
        let window = WhiteBalanceCorrector::new()
            .sample_window(&image, &WhitePatch::new(50.9, 50.2, 30.0))
            .unwrap();
        assert_eq!(window, Rect::new(20, 20, 60, 60));
    }
}
