//! Configuration structures for the garment scan pipeline.
//!
//! This module defines all tunable parameters of a scan, organized into
//! logical groups for calibration, masking, clustering, and encoding.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use garment_scan::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = PipelineConfig::default();
//! # Ok::<(), garment_scan::ScanError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`CalibrationConfig`]: coin scale and white balance settings
//! - [`MaskConfig`]: foreground thresholds shared by color and measurement
//! - [`ClusteringConfig`]: dominant color k-means termination criteria
//! - [`EncodingConfig`]: output compression quality

use crate::constants::{clustering, coins, encoding, mask, scale, white_balance};
use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete pipeline configuration for a garment scan.
///
/// Every section defaults to the reference constants, so a partial JSON file
/// only needs to name the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Scale and white balance calibration
    pub calibration: CalibrationConfig,

    /// Foreground mask thresholds
    pub mask: MaskConfig,

    /// Dominant color clustering
    pub clustering: ClusteringConfig,

    /// Output encoding
    pub encoding: EncodingConfig,
}

/// Calibration parameters applied before color and measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Coin pixel diameter assumed when the caller gives none
    pub default_diameter_px: f64,

    /// Pixels per millimeter used when no scale was established
    pub default_scale_ratio: f64,

    /// White balance correction settings
    pub white_balance: WhiteBalanceConfig,
}

/// White balance correction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteBalanceConfig {
    /// Enable white balance correction
    pub enabled: bool,

    /// Added to the sampled channel mean before division
    pub epsilon: f64,
}

/// Foreground mask thresholds.
///
/// One instance feeds both the color extractor and the measurer so the two
/// always agree on which pixels belong to the garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Alpha strictly above this is foreground
    pub alpha_threshold: u8,

    /// Grayscale strictly above this is foreground when there is no alpha
    pub gray_threshold: u8,
}

/// K-means termination criteria for dominant color extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Maximum iterations per attempt
    pub max_iterations: i32,

    /// Centroid movement that ends an attempt
    pub epsilon: f64,

    /// Number of random-seed attempts
    pub attempts: i32,
}

/// Output encoding parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Lossy quality, clamped to 0-100 at encode time
    pub quality: i32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            default_diameter_px: coins::DEFAULT_DIAMETER_PX,
            default_scale_ratio: scale::DEFAULT_SCALE_RATIO,
            white_balance: WhiteBalanceConfig::default(),
        }
    }
}

impl Default for WhiteBalanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            epsilon: white_balance::EPSILON,
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: mask::ALPHA_THRESHOLD,
            gray_threshold: mask::GRAY_THRESHOLD,
        }
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            max_iterations: clustering::MAX_ITERATIONS,
            epsilon: clustering::EPSILON,
            attempts: clustering::ATTEMPTS,
        }
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            quality: encoding::DEFAULT_QUALITY,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScanError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ScanError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            ScanError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }

    /// Reject values no stage can work with
    pub fn validate(&self) -> Result<()> {
        let calibration = &self.calibration;
        if !(calibration.default_scale_ratio.is_finite() && calibration.default_scale_ratio > 0.0) {
            return Err(ScanError::InvalidParameter {
                parameter: "calibration.default_scale_ratio".to_string(),
                value: calibration.default_scale_ratio.to_string(),
            });
        }
        if !(calibration.default_diameter_px.is_finite() && calibration.default_diameter_px > 0.0) {
            return Err(ScanError::InvalidParameter {
                parameter: "calibration.default_diameter_px".to_string(),
                value: calibration.default_diameter_px.to_string(),
            });
        }
        if self.clustering.max_iterations < 1 || self.clustering.attempts < 1 {
            return Err(ScanError::InvalidParameter {
                parameter: "clustering".to_string(),
                value: format!(
                    "max_iterations={}, attempts={}",
                    self.clustering.max_iterations, self.clustering.attempts
                ),
            });
        }
        Ok(())
    }
}
