//! Image decoding and lossy re-encoding
//!
//! Decoding goes through the `image` crate, so every format it supports is
//! accepted (JPEG, PNG, WebP, GIF, BMP, TIFF, ...). The decoded pixels are
//! converted to an OpenCV `Mat` in BGR (or BGRA when the source carries
//! alpha) for consistent downstream processing. EXIF orientation is applied
//! before conversion.
//!
//! Encoding produces lossy WebP through OpenCV's `imgcodecs`.

use crate::constants::encoding;
use crate::error::{Result, ScanError};
use crate::exif::ExifOrientation;
use crate::raster::RasterImage;
use opencv::{
    core::Vector,
    imgcodecs::{imencode, IMWRITE_WEBP_QUALITY},
};

/// Raster decoder and lossy WebP encoder
#[derive(Debug, Clone)]
pub struct ImageCodec {
    quality: i32,
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCodec {
    /// Create a codec encoding at the default quality (75)
    pub fn new() -> Self {
        Self {
            quality: encoding::DEFAULT_QUALITY,
        }
    }

    /// Create a codec with a custom quality, clamped to 0-100
    pub fn with_quality(quality: i32) -> Self {
        Self {
            quality: Self::clamp_quality(quality),
        }
    }

    /// Quality used by [`ImageCodec::encode`]
    pub fn quality(&self) -> i32 {
        self.quality
    }

    /// Clamp a requested quality into the encoder's accepted range
    pub fn clamp_quality(quality: i32) -> i32 {
        quality.clamp(encoding::MIN_QUALITY, encoding::MAX_QUALITY)
    }

    /// Decode image bytes into a raster
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidImage` if the buffer is empty, the format is
    /// not recognized, or decoding fails.
    pub fn decode(&self, bytes: &[u8]) -> Result<RasterImage> {
        if bytes.is_empty() {
            return Err(ScanError::InvalidImage {
                message: "empty image buffer".to_string(),
                source: None,
            });
        }

        let format = image::guess_format(bytes)
            .map_err(|e| ScanError::invalid_image("Unrecognized image format", e))?;

        let mut img = image::load_from_memory_with_format(bytes, format).map_err(|e| {
            ScanError::invalid_image(format!("Failed to decode {:?} image", format), e)
        })?;

        if let Some(orientation) = ExifOrientation::read(bytes) {
            tracing::debug!(?orientation, "applying EXIF orientation");
            img.apply_orientation(orientation);
        }

        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(ScanError::InvalidImage {
                message: format!("decoded image has no pixels ({}x{})", width, height),
                source: None,
            });
        }

        let raster = if img.color().has_alpha() {
            RasterImage::from_rgba8(width, height, img.to_rgba8().as_raw())?
        } else {
            RasterImage::from_rgb8(width, height, img.to_rgb8().as_raw())?
        };

        tracing::debug!(
            ?format,
            width,
            height,
            channels = raster.channels(),
            "decoded image"
        );
        Ok(raster)
    }

    /// Encode a raster as lossy WebP at this codec's quality
    pub fn encode(&self, image: &RasterImage) -> Result<Vec<u8>> {
        self.encode_with_quality(image, self.quality)
    }

    /// Encode a raster as lossy WebP at an explicit quality (clamped to 0-100)
    pub fn encode_with_quality(&self, image: &RasterImage, quality: i32) -> Result<Vec<u8>> {
        let quality = Self::clamp_quality(quality);
        let params = Vector::<i32>::from_slice(&[IMWRITE_WEBP_QUALITY, quality]);
        let mut buffer = Vector::<u8>::new();

        let written = imencode(encoding::FILE_EXTENSION, image.as_mat(), &mut buffer, &params)
            .map_err(|e| ScanError::encode("WebP encoding failed", e))?;
        if !written || buffer.is_empty() {
            return Err(ScanError::EncodeError {
                message: "encoder produced no output".to_string(),
                source: None,
            });
        }

        tracing::debug!(quality, bytes = buffer.len(), "encoded WebP");
        Ok(buffer.to_vec())
    }
}
