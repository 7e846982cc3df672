//! # Garment Scan
//!
//! A Rust crate for measuring garments from phone photos and pairing them
//! into outfits.
//!
//! This library provides calibrated garment scans by:
//! - Deriving a physical scale from a reference coin marked on the photo
//! - Correcting color cast against a user-marked white patch
//! - Extracting the garment's dominant color from its foreground pixels
//! - Measuring the garment's bounding box in centimeters
//! - Re-encoding the result as lossy WebP
//!
//! A separate rule-based engine suggests outfit pairings from a fixed
//! warm/cool/neutral color model.
//!
//! ## Example
//!
//! ```rust,no_run
//! use garment_scan::{scan_garment, CoinCalibration, WhitePatch};
//!
//! let bytes = std::fs::read("shirt.jpg")?;
//! let coin = CoinCalibration::generic(81.0);
//! let patch = WhitePatch::new(40.0, 40.0, 30.0);
//!
//! let output = scan_garment(&bytes, &coin, &patch)?;
//! println!("{} {:?}", output.metadata.color_hex, output.metadata.measurements);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod calibration;
pub mod codec;
pub mod color;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod exif;
pub mod pipeline;
pub mod raster;
pub mod recommend;
pub mod segmentation;
pub mod skin_tone;

pub use calibration::{CoinCalibration, ScaleCalibrator, ScaleRatio, WhiteBalanceCorrector, WhitePatch};
pub use codec::ImageCodec;
pub use color::{ColorSample, ColorTemperatureModel, DominantColorExtractor, Temperature};
pub use config::PipelineConfig;
pub use detection::{GarmentMeasurer, Measurements};
pub use error::{Result, ScanError};
pub use pipeline::{GarmentMetadata, GarmentPipeline, ScanOutput};
pub use raster::RasterImage;
pub use recommend::{Garment, InstantMatch, OutfitRecommender, WeeklyPlanResponse};
pub use segmentation::{PassThroughSegmenter, Segmenter};
pub use skin_tone::{SkinToneAnalyzer, SkinToneReport};

/// Scan a garment photo with the default pipeline
///
/// This is the main entry point for garment scanning. It decodes the photo,
/// calibrates scale and white balance from the two user-marked points, and
/// returns the WebP-encoded result with its color and measurements.
///
/// # Arguments
///
/// * `bytes` - Encoded photo (JPEG, PNG, WebP, ...)
/// * `coin` - Reference coin marked on the photo
/// * `patch` - White reference patch marked on the photo
///
/// # Errors
///
/// Returns `ScanError::InvalidImage` if the bytes cannot be decoded. Every
/// calibration and measurement edge case has a fallback value instead.
pub fn scan_garment(bytes: &[u8], coin: &CoinCalibration, patch: &WhitePatch) -> Result<ScanOutput> {
    GarmentPipeline::new().process(bytes, coin, patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_serialization() {
        let metadata = GarmentMetadata {
            color_hex: "#3366cc".to_string(),
            measurements: Measurements {
                width_cm: 42.5,
                height_cm: 61.0,
                area_cm2: 2592.5,
            },
            scale_ratio: 3.0,
            file_format: "webp".to_string(),
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["measurements"]["area_cm2"], 2592.5);
        assert_eq!(json["file_format"], "webp");

        let deserialized: GarmentMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(metadata, deserialized);
    }

    #[test]
    fn test_scan_garment_rejects_empty_input() {
        let err = scan_garment(&[], &CoinCalibration::default(), &WhitePatch::default()).unwrap_err();
        assert!(matches!(err, ScanError::InvalidImage { .. }));
    }
}
