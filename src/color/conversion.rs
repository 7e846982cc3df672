//! Hex color representation
//!
//! Colors travel through the API as `#rrggbb` strings. Parsing and formatting
//! go through `palette`'s 8-bit sRGB type.

use crate::{Result, ScanError};
use palette::Srgb;
use std::fmt;

/// An 8-bit sRGB color with hex string conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSample {
    rgb: Srgb<u8>,
}

impl ColorSample {
    /// Create from 8-bit channel values
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            rgb: Srgb::new(red, green, blue),
        }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string, either case
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidColor` for anything that is not six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ScanError::InvalidColor {
                value: hex.to_string(),
            });
        }
        let rgb: Srgb<u8> = digits.parse().map_err(|_| ScanError::InvalidColor {
            value: hex.to_string(),
        })?;
        Ok(Self { rgb })
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            self.rgb.red, self.rgb.green, self.rgb.blue
        )
    }

    /// Red channel
    pub fn red(&self) -> u8 {
        self.rgb.red
    }

    /// Green channel
    pub fn green(&self) -> u8 {
        self.rgb.green
    }

    /// Blue channel
    pub fn blue(&self) -> u8 {
        self.rgb.blue
    }

    /// Channels as an `[r, g, b]` array
    pub fn to_array(&self) -> [u8; 3] {
        [self.rgb.red, self.rgb.green, self.rgb.blue]
    }
}

impl From<[u8; 3]> for ColorSample {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl fmt::Display for ColorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_is_lowercase_and_padded() {
        assert_eq!(ColorSample::new(255, 107, 53).to_hex(), "#ff6b35");
        assert_eq!(ColorSample::new(0, 5, 10).to_hex(), "#00050a");
        assert_eq!(ColorSample::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_from_hex() {
        let upper = ColorSample::from_hex("#FF6B35").unwrap();
        assert_eq!(upper.to_array(), [255, 107, 53]);

        let bare = ColorSample::from_hex("0066cc").unwrap();
        assert_eq!((bare.red(), bare.green(), bare.blue()), (0, 102, 204));
    }

    #[test]
    fn test_from_hex_invalid() {
        // "#a\u{e9}bbb" is six bytes but not six characters
        for bad in ["#FF", "#GGGGGG", "", "#", "#12345678", "#fff", "#a\u{e9}bbb", "+12345", "#12 345"] {
            let err = ColorSample::from_hex(bad).unwrap_err();
            assert!(matches!(err, ScanError::InvalidColor { .. }), "{}", bad);
        }
    }
}
