//! Garment foreground and outline detection module
//!
//! This module separates garment pixels from background and measures the
//! garment's outline in physical units.

pub mod mask;
pub mod outline;

pub use mask::ForegroundMask;
pub use outline::{GarmentMeasurer, Measurements};
