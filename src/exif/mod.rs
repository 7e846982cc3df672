//! EXIF metadata module
//!
//! This module handles the EXIF metadata a garment photo needs before
//! calibration, namely the camera orientation.

pub mod orientation;

pub use orientation::ExifOrientation;
