//! Color temperature classification and complementary palettes
//!
//! A fixed-table color theory: a color is warm when red plus green clearly
//! outweighs blue, cool when blue clearly outweighs red plus green, and
//! neutral inside a band of 30 around the balance point. The complement of a
//! temperature is the opposite temperature's palette, not a color-wheel
//! complement.

use crate::color::ColorSample;
use crate::constants::palettes;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperature class of a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Warm,
    Cool,
    Neutral,
}

impl Temperature {
    /// Lowercase label, as used in styling notes
    pub fn as_str(&self) -> &'static str {
        match self {
            Temperature::Warm => "warm",
            Temperature::Cool => "cool",
            Temperature::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Palette-based color temperature model
///
/// Holds the three palettes and the neutral band; the default instance uses
/// the built-in tables.
#[derive(Debug, Clone, Copy)]
pub struct ColorTemperatureModel {
    warm: &'static [&'static str],
    cool: &'static [&'static str],
    neutral: &'static [&'static str],
    neutral_band: i32,
    complement_count: usize,
}

impl Default for ColorTemperatureModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorTemperatureModel {
    /// Model over the built-in palettes
    pub const fn new() -> Self {
        Self {
            warm: &palettes::WARM,
            cool: &palettes::COOL,
            neutral: &palettes::NEUTRAL,
            neutral_band: palettes::NEUTRAL_BAND,
            complement_count: palettes::COMPLEMENT_COUNT,
        }
    }

    /// Classify a `#rrggbb` color
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidColor` if `hex` is not a hex color.
    pub fn classify(&self, hex: &str) -> Result<Temperature> {
        let color = ColorSample::from_hex(hex)?;
        Ok(self.classify_sample(&color))
    }

    /// Classify an already parsed color
    pub fn classify_sample(&self, color: &ColorSample) -> Temperature {
        let warm_score = i32::from(color.red()) + i32::from(color.green());
        let cool_score = i32::from(color.blue());

        if (warm_score - cool_score).abs() < self.neutral_band {
            Temperature::Neutral
        } else if warm_score > cool_score {
            Temperature::Warm
        } else {
            Temperature::Cool
        }
    }

    /// Complementary colors of a `#rrggbb` color, in palette order
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidColor` if `hex` is not a hex color.
    pub fn complementary(&self, hex: &str) -> Result<Vec<&'static str>> {
        Ok(self.palette_for(self.classify(hex)?))
    }

    /// Complementary palette of a temperature: warm gets cool colors,
    /// cool gets warm colors, neutral gets neutrals
    pub fn palette_for(&self, temperature: Temperature) -> Vec<&'static str> {
        let palette = match temperature {
            Temperature::Warm => self.cool,
            Temperature::Cool => self.warm,
            Temperature::Neutral => self.neutral,
        };
        palette.iter().take(self.complement_count).copied().collect()
    }
}
