//! Color analysis and conversion module
//!
//! This module handles hex color representation, dominant color extraction
//! from garment pixels, and warm/cool/neutral classification.

pub mod analysis;
pub mod conversion;
pub mod temperature;

pub use analysis::DominantColorExtractor;
pub use conversion::ColorSample;
pub use temperature::{ColorTemperatureModel, Temperature};
