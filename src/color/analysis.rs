//! Dominant garment color extraction
//!
//! Collects the garment's foreground pixels and reduces them to one
//! representative color with single-cluster k-means. With one cluster the
//! centroid converges to the mean of the foreground colors; OpenCV's k-means
//! keeps the termination criteria (10 iterations or epsilon 1.0, best of 10
//! random-seed attempts) reproducible.

use crate::color::ColorSample;
use crate::config::{ClusteringConfig, MaskConfig};
use crate::constants::clustering;
use crate::detection::ForegroundMask;
use crate::error::{Result, ScanError};
use crate::raster::RasterImage;
use opencv::{
    core::{self, Mat, TermCriteria, CV_32F, KMEANS_RANDOM_CENTERS},
    prelude::*,
};

/// Extracts the dominant color of a garment image
#[derive(Debug, Clone)]
pub struct DominantColorExtractor {
    mask_config: MaskConfig,
    clustering: ClusteringConfig,
}

impl Default for DominantColorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DominantColorExtractor {
    /// Create an extractor with default thresholds and clustering criteria
    pub fn new() -> Self {
        Self {
            mask_config: MaskConfig::default(),
            clustering: ClusteringConfig::default(),
        }
    }

    /// Create an extractor with custom parameters
    pub fn with_params(mask_config: MaskConfig, clustering: ClusteringConfig) -> Self {
        Self {
            mask_config,
            clustering,
        }
    }

    /// Dominant color as lowercase `#rrggbb`
    ///
    /// Returns `#808080` when the image has no foreground pixel.
    pub fn extract(&self, image: &RasterImage) -> Result<String> {
        match self.extract_sample(image)? {
            Some(sample) => Ok(sample.to_hex()),
            None => {
                tracing::warn!("no foreground pixels, using fallback color");
                Ok(clustering::FALLBACK_COLOR.to_string())
            }
        }
    }

    /// Dominant color, or `None` when the image has no foreground pixel
    pub fn extract_sample(&self, image: &RasterImage) -> Result<Option<ColorSample>> {
        let samples = self.foreground_samples(image)?;
        if samples.rows() == 0 {
            return Ok(None);
        }

        let center = self.cluster_center(&samples)?;
        let sample = ColorSample::from(center.map(|c| c.round().clamp(0.0, 255.0) as u8));
        tracing::debug!(pixels = samples.rows(), color = %sample, "extracted dominant color");
        Ok(Some(sample))
    }

    /// Foreground pixels as an N x 3 `CV_32F` matrix in R, G, B order
    ///
    /// Images with alpha keep only pixels above the alpha threshold; images
    /// without alpha contribute every pixel.
    fn foreground_samples(&self, image: &RasterImage) -> Result<Mat> {
        let mask = ForegroundMask::from_alpha(image, &self.mask_config)?;
        let mask_data = mask.as_ref().map(ForegroundMask::data).transpose()?;

        let channels = image.channels();
        let mut pixels: Vec<f32> = Vec::new();
        for (idx, px) in image.data()?.chunks_exact(channels).enumerate() {
            let keep = mask_data.map_or(true, |m| m[idx] != 0);
            if keep {
                pixels.extend_from_slice(&[f32::from(px[2]), f32::from(px[1]), f32::from(px[0])]);
            }
        }

        let rows = (pixels.len() / 3) as i32;
        if rows == 0 {
            return Ok(Mat::default());
        }

        let mut samples = Mat::zeros(rows, 3, CV_32F)
            .map_err(|e| ScanError::opencv("Sample matrix allocation", e))?
            .to_mat()
            .map_err(|e| ScanError::opencv("Sample matrix conversion", e))?;
        samples
            .data_typed_mut::<f32>()
            .map_err(|e| ScanError::opencv("Sample matrix access", e))?
            .copy_from_slice(&pixels);
        Ok(samples)
    }

    /// Single k-means centroid of the samples
    fn cluster_center(&self, samples: &Mat) -> Result<[f32; 3]> {
        let criteria = TermCriteria::new(
            core::TermCriteria_COUNT + core::TermCriteria_EPS,
            self.clustering.max_iterations,
            self.clustering.epsilon,
        )
        .map_err(|e| ScanError::opencv("Termination criteria", e))?;

        let mut labels = Mat::default();
        let mut centers = Mat::default();
        core::kmeans(
            samples,
            clustering::CLUSTER_COUNT,
            &mut labels,
            criteria,
            self.clustering.attempts,
            KMEANS_RANDOM_CENTERS,
            &mut centers,
        )
        .map_err(|e| ScanError::opencv("K-means clustering", e))?;

        let row = centers
            .at_row::<f32>(0)
            .map_err(|e| ScanError::opencv("Cluster center access", e))?;
        match row {
            [r, g, b, ..] => Ok([*r, *g, *b]),
            _ => Err(ScanError::ProcessingError {
                message: format!("cluster center has {} components", row.len()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_rgba_returns_its_color() {
        let image = RasterImage::from_rgba8(12, 8, &[12u8, 200, 99, 255].repeat(96)).unwrap();
        let hex = DominantColorExtractor::new().extract(&image).unwrap();
        assert_eq!(hex, "#0cc863");
    }

    #[test]
    fn test_fully_transparent_returns_gray() {
        let image = RasterImage::from_rgba8(6, 6, &[255u8, 0, 0, 128].repeat(36)).unwrap();
        let extractor = DominantColorExtractor::new();
        assert_eq!(extractor.extract(&image).unwrap(), "#808080");
        assert!(extractor.extract_sample(&image).unwrap().is_none());
    }

    #[test]
    fn test_transparent_pixels_are_ignored() {
        let mut data = [255u8, 0, 0, 0].repeat(50); // transparent red
        data.extend([0u8, 0, 255, 200].repeat(50)); // opaque blue
        data.extend([0u8, 255, 0, 128].repeat(50)); // green at the threshold
        let image = RasterImage::from_rgba8(15, 10, &data).unwrap();
        assert_eq!(DominantColorExtractor::new().extract(&image).unwrap(), "#0000ff");
    }

    #[test]
    fn test_rgb_image_uses_every_pixel() {
        let mut data = [0u8, 0, 0].repeat(32);
        data.extend([200u8, 100, 50].repeat(32));
        let image = RasterImage::from_rgb8(8, 8, &data).unwrap();
        assert_eq!(DominantColorExtractor::new().extract(&image).unwrap(), "#643219");
    }

    #[test]
    fn test_single_pixel_image() {
        let image = RasterImage::from_rgb8(1, 1, &[1, 2, 3]).unwrap();
        assert_eq!(DominantColorExtractor::new().extract(&image).unwrap(), "#010203");
    }
}
