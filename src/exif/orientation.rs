//! EXIF orientation lookup
//!
//! Phone cameras store pixels in sensor order and record the intended
//! rotation in the EXIF `Orientation` tag. Calibration points are picked on
//! the upright image, so decoding must honor the tag.

use image::metadata::Orientation;
use std::io::Cursor;

/// Reads orientation metadata from encoded image bytes
pub struct ExifOrientation;

impl ExifOrientation {
    /// Orientation recorded in the container, if any
    ///
    /// Absent, unreadable or out-of-range tags yield `None`; EXIF problems
    /// never fail a decode.
    pub fn read(bytes: &[u8]) -> Option<Orientation> {
        let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
            Ok(exif) => exif,
            Err(e) => {
                tracing::trace!("no EXIF block: {}", e);
                return None;
            }
        };

        let value = exif
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
            .value
            .get_uint(0)?;

        u8::try_from(value).ok().and_then(Orientation::from_exif)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_has_no_orientation() {
        assert_eq!(ExifOrientation::read(b"not an image"), None);
        assert_eq!(ExifOrientation::read(&[]), None);
    }

    #[test]
    fn test_png_without_exif() {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        assert_eq!(ExifOrientation::read(&buf), None);
    }
}
