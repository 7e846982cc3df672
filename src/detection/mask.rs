//! Foreground mask extraction
//!
//! A binary mask separating garment pixels from background. With an alpha
//! channel (the segmenter's output) a pixel is foreground when its alpha is
//! above the threshold; without one, when its grayscale intensity is.
//!
//! The color extractor and the measurer build their masks here so both see
//! the same garment.

use crate::config::MaskConfig;
use crate::constants::mask;
use crate::error::{Result, ScanError};
use crate::raster::RasterImage;
use opencv::{
    core::{self, Mat},
    imgproc::{cvt_color, threshold, COLOR_BGR2GRAY, COLOR_BGRA2GRAY, THRESH_BINARY},
    prelude::*,
};

/// Single-channel 8-bit mask: 255 = foreground, 0 = background
#[derive(Debug)]
pub struct ForegroundMask {
    mask: Mat,
}

impl ForegroundMask {
    /// Mask from the alpha channel, or from grayscale intensity if there is none
    pub fn from_image(image: &RasterImage, config: &MaskConfig) -> Result<Self> {
        match Self::from_alpha(image, config)? {
            Some(mask) => Ok(mask),
            None => Self::from_grayscale(image, config),
        }
    }

    /// Mask from the alpha channel; `None` when the image has no alpha
    pub fn from_alpha(image: &RasterImage, config: &MaskConfig) -> Result<Option<Self>> {
        if !image.has_alpha() {
            return Ok(None);
        }

        let mut alpha = Mat::default();
        core::extract_channel(image.as_mat(), &mut alpha, 3)
            .map_err(|e| ScanError::opencv("Alpha channel extraction", e))?;

        Self::binarize(&alpha, config.alpha_threshold).map(Some)
    }

    /// Mask from grayscale intensity, ignoring any alpha channel
    pub fn from_grayscale(image: &RasterImage, config: &MaskConfig) -> Result<Self> {
        let code = if image.has_alpha() {
            COLOR_BGRA2GRAY
        } else {
            COLOR_BGR2GRAY
        };
        let mut gray = Mat::default();
        cvt_color(image.as_mat(), &mut gray, code, 0)
            .map_err(|e| ScanError::opencv("Grayscale conversion", e))?;

        Self::binarize(&gray, config.gray_threshold)
    }

    /// Values strictly above `cutoff` become foreground
    fn binarize(channel: &Mat, cutoff: u8) -> Result<Self> {
        let mut binary = Mat::default();
        threshold(
            channel,
            &mut binary,
            f64::from(cutoff),
            f64::from(mask::FOREGROUND),
            THRESH_BINARY,
        )
        .map_err(|e| ScanError::opencv("Mask threshold", e))?;
        Ok(Self { mask: binary })
    }

    /// Number of foreground pixels
    pub fn foreground_count(&self) -> Result<usize> {
        let count = core::count_non_zero(&self.mask)
            .map_err(|e| ScanError::opencv("Foreground count", e))?;
        Ok(count as usize)
    }

    /// Mask values, row-major, one byte per pixel
    pub fn data(&self) -> Result<&[u8]> {
        self.mask
            .data_bytes()
            .map_err(|e| ScanError::opencv("Mask data access", e))
    }

    /// Underlying single-channel matrix
    pub fn as_mat(&self) -> &Mat {
        &self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_threshold_is_strict() {
        // alpha 128 is background, 129 is foreground
        let data = [10u8, 10, 10, 128, 10, 10, 10, 129, 10, 10, 10, 0, 10, 10, 10, 255];
        let image = RasterImage::from_rgba8(4, 1, &data).unwrap();
        let mask = ForegroundMask::from_image(&image, &MaskConfig::default()).unwrap();
        assert_eq!(mask.data().unwrap(), &[0, 255, 0, 255]);
        assert_eq!(mask.foreground_count().unwrap(), 2);
    }

    #[test]
    fn test_grayscale_threshold_without_alpha() {
        let data = [
            255u8, 255, 255, // white -> foreground
            0, 0, 0, // black -> background
            128, 128, 128, // exactly at threshold -> background
            200, 200, 200, // light gray -> foreground
        ];
        let image = RasterImage::from_rgb8(4, 1, &data).unwrap();
        let mask = ForegroundMask::from_image(&image, &MaskConfig::default()).unwrap();
        assert_eq!(mask.data().unwrap(), &[255, 0, 0, 255]);
    }

    #[test]
    fn test_from_alpha_is_none_without_alpha() {
        let image = RasterImage::from_rgb8(1, 1, &[1, 2, 3]).unwrap();
        assert!(ForegroundMask::from_alpha(&image, &MaskConfig::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_grayscale_mask_ignores_alpha() {
        let data = [255u8, 255, 255, 0, 0, 0, 0, 255];
        let image = RasterImage::from_rgba8(2, 1, &data).unwrap();
        let mask = ForegroundMask::from_grayscale(&image, &MaskConfig::default()).unwrap();
        assert_eq!(mask.data().unwrap(), &[255, 0]);
    }

    #[test]
    fn test_custom_threshold() {
        let config = MaskConfig {
            alpha_threshold: 10,
            ..MaskConfig::default()
        };
        let data = [0u8, 0, 0, 11, 0, 0, 0, 10];
        let image = RasterImage::from_rgba8(2, 1, &data).unwrap();
        let mask = ForegroundMask::from_image(&image, &config).unwrap();
        assert_eq!(mask.data().unwrap(), &[255, 0]);
    }
}
