//! 8-bit raster buffer shared by every pipeline stage
//!
//! Wraps an OpenCV `Mat` in BGR (3 channels) or BGRA (4 channels) order,
//! the standard OpenCV layout. Constructors accept interleaved RGB/RGBA
//! bytes and perform the channel swap.

use crate::error::{Result, ScanError};
use opencv::{
    core::{Mat, CV_8U, CV_8UC3, CV_8UC4},
    prelude::*,
};

/// Decoded image with 3 (color) or 4 (color + alpha) channels
///
/// Invariant: depth is 8-bit unsigned, channel count is 3 or 4, and both
/// spatial dimensions are non-zero.
#[derive(Debug)]
pub struct RasterImage {
    mat: Mat,
}

impl RasterImage {
    /// Wrap an existing BGR/BGRA `Mat`, checking the raster invariants
    pub fn from_mat(mat: Mat) -> Result<Self> {
        if mat.empty() || mat.rows() <= 0 || mat.cols() <= 0 {
            return Err(ScanError::InvalidParameter {
                parameter: "raster".to_string(),
                value: "empty".to_string(),
            });
        }
        if mat.depth() != CV_8U {
            return Err(ScanError::InvalidParameter {
                parameter: "raster.depth".to_string(),
                value: mat.depth().to_string(),
            });
        }
        let channels = mat.channels();
        if channels != 3 && channels != 4 {
            return Err(ScanError::InvalidParameter {
                parameter: "raster.channels".to_string(),
                value: channels.to_string(),
            });
        }
        Ok(Self { mat })
    }

    /// Build from interleaved RGB bytes (row-major, 3 bytes per pixel)
    pub fn from_rgb8(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        Self::from_interleaved(width, height, 3, data)
    }

    /// Build from interleaved RGBA bytes (row-major, 4 bytes per pixel)
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        Self::from_interleaved(width, height, 4, data)
    }

    /// Convert interleaved RGB(A) into an OpenCV BGR(A) `Mat`
    fn from_interleaved(width: u32, height: u32, channels: usize, data: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ScanError::InvalidParameter {
                parameter: "dimensions".to_string(),
                value: format!("{}x{}", width, height),
            });
        }
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(ScanError::InvalidParameter {
                parameter: "pixel buffer length".to_string(),
                value: format!("{} (expected {})", data.len(), expected),
            });
        }

        let typ = if channels == 4 { CV_8UC4 } else { CV_8UC3 };
        let mut mat = Mat::zeros(height as i32, width as i32, typ)
            .map_err(|e| ScanError::opencv("Mat allocation", e))?
            .to_mat()
            .map_err(|e| ScanError::opencv("Mat conversion", e))?;

        let dst = mat
            .data_bytes_mut()
            .map_err(|e| ScanError::opencv("Mat data access", e))?;
        for (out, px) in dst.chunks_exact_mut(channels).zip(data.chunks_exact(channels)) {
            // BGR order for OpenCV
            out[0] = px[2];
            out[1] = px[1];
            out[2] = px[0];
            if channels == 4 {
                out[3] = px[3];
            }
        }

        Self::from_mat(mat)
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.mat.cols() as u32
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.mat.rows() as u32
    }

    /// Channel count (3 or 4)
    pub fn channels(&self) -> usize {
        self.mat.channels() as usize
    }

    /// Whether a 4th (alpha) channel is present
    pub fn has_alpha(&self) -> bool {
        self.channels() == 4
    }

    /// Underlying BGR/BGRA matrix
    pub fn as_mat(&self) -> &Mat {
        &self.mat
    }

    /// Consume into the underlying matrix
    pub fn into_mat(self) -> Mat {
        self.mat
    }

    /// Deep copy
    pub fn try_clone(&self) -> Result<Self> {
        let mat = self
            .mat
            .try_clone()
            .map_err(|e| ScanError::opencv("Mat clone", e))?;
        Ok(Self { mat })
    }

    /// Raw interleaved BGR(A) bytes, row-major
    pub fn data(&self) -> Result<&[u8]> {
        self.mat
            .data_bytes()
            .map_err(|e| ScanError::opencv("Mat data access", e))
    }

    /// RGB value of the pixel at column `x`, row `y`
    pub fn rgb_at(&self, x: u32, y: u32) -> Result<[u8; 3]> {
        let px = self.pixel(x, y)?;
        Ok([px[2], px[1], px[0]])
    }

    /// Alpha value of the pixel at column `x`, row `y`, if there is an alpha channel
    pub fn alpha_at(&self, x: u32, y: u32) -> Result<Option<u8>> {
        let px = self.pixel(x, y)?;
        Ok(px.get(3).copied())
    }

    fn pixel(&self, x: u32, y: u32) -> Result<&[u8]> {
        if x >= self.width() || y >= self.height() {
            return Err(ScanError::InvalidParameter {
                parameter: "pixel".to_string(),
                value: format!("({}, {}) outside {}x{}", x, y, self.width(), self.height()),
            });
        }
        let channels = self.channels();
        let idx = (y as usize * self.width() as usize + x as usize) * channels;
        let data = self.data()?;
        Ok(&data[idx..idx + channels])
    }
}
