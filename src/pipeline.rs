//! Garment scan pipeline
//!
//! Runs the scan stages in a fixed order:
//!
//! 1. decode the uploaded bytes
//! 2. compute the coin scale
//! 3. white-balance against the reference patch
//! 4. segment the garment from its background
//! 5. extract the dominant color
//! 6. measure the outline
//! 7. re-encode as WebP
//!
//! Only decoding can fail on user input; every later stage has a defined
//! fallback. A [`GarmentPipeline`] holds configuration only. Everything a
//! run computes lives in a [`ScanRun`] owned by that call, so one pipeline
//! can serve concurrent scans from several threads.

use crate::calibration::{CoinCalibration, ScaleCalibrator, ScaleRatio, WhiteBalanceCorrector, WhitePatch};
use crate::codec::ImageCodec;
use crate::color::DominantColorExtractor;
use crate::config::PipelineConfig;
use crate::constants::{coins, encoding};
use crate::detection::{GarmentMeasurer, Measurements};
use crate::error::Result;
use crate::raster::RasterImage;
use crate::segmentation::{PassThroughSegmenter, Segmenter};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Metadata describing a scanned garment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentMetadata {
    /// Dominant color as lowercase `#rrggbb`
    pub color_hex: String,
    /// Physical dimensions
    pub measurements: Measurements,
    /// Pixels per millimeter used for the measurements
    pub scale_ratio: f64,
    /// Format tag of the encoded image
    pub file_format: String,
}

/// Encoded image plus its metadata
#[derive(Debug, Clone)]
pub struct ScanOutput {
    /// WebP bytes
    pub image: Vec<u8>,
    pub metadata: GarmentMetadata,
}

/// State of a single scan, threaded through the stages
struct ScanRun {
    image: RasterImage,
    scale: ScaleRatio,
    color_hex: Option<String>,
    measurements: Option<Measurements>,
}

impl ScanRun {
    fn into_metadata(self) -> (RasterImage, GarmentMetadata) {
        let metadata = GarmentMetadata {
            color_hex: self.color_hex.unwrap_or_default(),
            measurements: self.measurements.unwrap_or_default(),
            scale_ratio: self.scale.px_per_mm(),
            file_format: encoding::FILE_FORMAT.to_string(),
        };
        (self.image, metadata)
    }
}

/// Stateless garment scan orchestrator
pub struct GarmentPipeline {
    config: PipelineConfig,
    codec: ImageCodec,
    calibrator: ScaleCalibrator,
    corrector: WhiteBalanceCorrector,
    extractor: DominantColorExtractor,
    measurer: GarmentMeasurer,
    segmenter: Box<dyn Segmenter>,
}

impl Default for GarmentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GarmentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GarmentPipeline")
            .field("config", &self.config)
            .field("segmenter", &self.segmenter.name())
            .finish()
    }
}

impl GarmentPipeline {
    /// Pipeline with default configuration and a pass-through segmenter
    pub fn new() -> Self {
        Self::from_config(PipelineConfig::default())
    }

    /// Pipeline built from a configuration
    pub fn from_config(config: PipelineConfig) -> Self {
        let default_scale =
            ScaleRatio::new(config.calibration.default_scale_ratio).unwrap_or_default();

        Self {
            codec: ImageCodec::with_quality(config.encoding.quality),
            calibrator: ScaleCalibrator::with_default_diameter(config.calibration.default_diameter_px),
            corrector: WhiteBalanceCorrector::from_config(&config.calibration.white_balance),
            extractor: DominantColorExtractor::with_params(
                config.mask.clone(),
                config.clustering.clone(),
            ),
            measurer: GarmentMeasurer::with_params(config.mask.clone(), default_scale),
            segmenter: Box::new(PassThroughSegmenter),
            config,
        }
    }

    /// Replace the background segmentation stage
    pub fn with_segmenter(mut self, segmenter: impl Segmenter + 'static) -> Self {
        self.segmenter = Box::new(segmenter);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Scan a garment photo with user calibration
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidImage` if `bytes` cannot be decoded. Other
    /// errors indicate an imaging library failure, not bad input.
    pub fn process(
        &self,
        bytes: &[u8],
        coin: &CoinCalibration,
        patch: &WhitePatch,
    ) -> Result<ScanOutput> {
        let started = Instant::now();
        let image = self.codec.decode(bytes)?;
        let run = ScanRun {
            scale: self.calibrator.calibrate(coin),
            image,
            color_hex: None,
            measurements: None,
        };

        let run = self.white_balance(run, patch)?;
        let run = self.segment(run);
        let run = self.extract_color(run)?;
        let run = self.measure(run)?;

        let (image, metadata) = run.into_metadata();
        let encoded = self.codec.encode(&image)?;

        tracing::info!(
            color = %metadata.color_hex,
            width_cm = metadata.measurements.width_cm,
            height_cm = metadata.measurements.height_cm,
            scale = metadata.scale_ratio,
            bytes = encoded.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "garment scan complete"
        );

        Ok(ScanOutput {
            image: encoded,
            metadata,
        })
    }

    /// Scan without user calibration
    ///
    /// Assumes a generic 100 px coin and skips white balance.
    pub fn quick_scan(&self, bytes: &[u8]) -> Result<ScanOutput> {
        let coin = CoinCalibration::generic(coins::DEFAULT_DIAMETER_PX);
        let patch = WhitePatch::new(0.0, 0.0, 0.0);
        self.process(bytes, &coin, &patch)
    }

    fn white_balance(&self, run: ScanRun, patch: &WhitePatch) -> Result<ScanRun> {
        let image = self.corrector.correct(run.image, patch)?;
        Ok(ScanRun { image, ..run })
    }

    fn segment(&self, run: ScanRun) -> ScanRun {
        tracing::debug!(segmenter = self.segmenter.name(), "segmenting garment");
        let image = self.segmenter.segment(run.image);
        ScanRun { image, ..run }
    }

    fn extract_color(&self, run: ScanRun) -> Result<ScanRun> {
        let color_hex = self.extractor.extract(&run.image)?;
        Ok(ScanRun {
            color_hex: Some(color_hex),
            ..run
        })
    }

    fn measure(&self, run: ScanRun) -> Result<ScanRun> {
        let measurements = self.measurer.measure(&run.image, Some(run.scale))?;
        Ok(ScanRun {
            measurements: Some(measurements),
            ..run
        })
    }
}
