//! Coin-based scale calibration
//!
//! A coin of known physical diameter photographed next to the garment gives
//! the pixels-per-millimeter ratio used to convert measurements.

use crate::constants::{coins, scale};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixels per millimeter. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleRatio(f64);

impl ScaleRatio {
    /// Create a ratio, rejecting zero, negative and non-finite values
    pub fn new(px_per_mm: f64) -> Option<Self> {
        (px_per_mm.is_finite() && px_per_mm > 0.0).then_some(Self(px_per_mm))
    }

    /// Pixels per millimeter
    pub fn px_per_mm(self) -> f64 {
        self.0
    }

    /// Convert a pixel length to centimeters
    pub fn px_to_cm(self, px: f64) -> f64 {
        px / self.0 / scale::MM_PER_CM
    }
}

impl Default for ScaleRatio {
    fn default() -> Self {
        Self(scale::DEFAULT_SCALE_RATIO)
    }
}

impl fmt::Display for ScaleRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} px/mm", self.0)
    }
}

/// Reference coin denominations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denomination {
    /// Rp 500 (27 mm)
    Rp500,
    /// Rp 1000 (26 mm)
    Rp1000,
    /// Rp 5000 (33 mm)
    Rp5000,
    /// Unknown coin, assumed 27 mm
    Generic,
}

impl Denomination {
    /// Map a caller-supplied tag; unrecognized tags are `Generic`
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "500" => Denomination::Rp500,
            "1000" => Denomination::Rp1000,
            "5000" => Denomination::Rp5000,
            _ => Denomination::Generic,
        }
    }

    /// Physical diameter in millimeters
    pub fn diameter_mm(self) -> f64 {
        match self {
            Denomination::Rp500 => coins::RP_500_MM,
            Denomination::Rp1000 => coins::RP_1000_MM,
            Denomination::Rp5000 => coins::RP_5000_MM,
            Denomination::Generic => coins::GENERIC_MM,
        }
    }
}

/// Coin marked by the user on the photo
///
/// Mirrors the `{x, y, diameter_pixels, type}` object sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinCalibration {
    /// Coin center column
    #[serde(default)]
    pub x: f64,
    /// Coin center row
    #[serde(default)]
    pub y: f64,
    /// Coin diameter in pixels
    #[serde(default)]
    pub diameter_pixels: Option<f64>,
    /// Denomination tag ("500", "1000", "5000", "generic")
    #[serde(default, rename = "type")]
    pub denomination: Option<String>,
}

impl CoinCalibration {
    /// Generic coin of the given pixel diameter
    pub fn generic(diameter_pixels: f64) -> Self {
        Self {
            diameter_pixels: Some(diameter_pixels),
            denomination: Some(coins::GENERIC_TAG.to_string()),
            ..Self::default()
        }
    }
}

/// Converts a coin's pixel diameter into a [`ScaleRatio`]
#[derive(Debug, Clone)]
pub struct ScaleCalibrator {
    default_diameter_px: f64,
}

impl Default for ScaleCalibrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleCalibrator {
    /// Create a calibrator assuming a 100 px coin when none is given
    pub fn new() -> Self {
        Self {
            default_diameter_px: coins::DEFAULT_DIAMETER_PX,
        }
    }

    /// Create a calibrator with a custom fallback pixel diameter
    pub fn with_default_diameter(default_diameter_px: f64) -> Self {
        Self {
            default_diameter_px,
        }
    }

    /// Compute pixels per millimeter from a coin's pixel diameter
    ///
    /// Never fails: a missing, zero, negative or non-finite diameter uses the
    /// default pixel diameter, and an unknown denomination uses the generic
    /// 27 mm coin.
    pub fn compute_scale(&self, diameter_px: Option<f64>, denomination: Option<&str>) -> ScaleRatio {
        let diameter_px = match diameter_px {
            Some(d) if d.is_finite() && d > 0.0 => d,
            Some(d) => {
                tracing::warn!(diameter_px = d, "unusable coin diameter, using default");
                self.default_diameter_px
            }
            None => self.default_diameter_px,
        };

        let tag = denomination.unwrap_or(coins::GENERIC_TAG);
        let coin = Denomination::from_tag(tag);
        if coin == Denomination::Generic && tag != coins::GENERIC_TAG {
            tracing::warn!(denomination = tag, "unknown coin denomination, assuming generic");
        }

        let ratio = ScaleRatio::new(diameter_px / coin.diameter_mm()).unwrap_or_default();
        tracing::debug!(diameter_px, ?coin, %ratio, "computed scale");
        ratio
    }

    /// Compute the scale for a user-marked coin
    pub fn calibrate(&self, coin: &CoinCalibration) -> ScaleRatio {
        self.compute_scale(coin.diameter_pixels, coin.denomination.as_deref())
    }
}
