//! Error types for the garment_scan library

use thiserror::Error;

/// Result type alias for garment_scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Error types for garment scanning and outfit recommendation
///
/// Only [`ScanError::InvalidImage`] is part of the normal scan contract:
/// every calibration and measurement edge case has a defined fallback value
/// and never surfaces here.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Input bytes could not be decoded as a supported raster format
    #[error("Invalid image data: {message}")]
    InvalidImage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Compressed output could not be produced
    #[error("Image encoding failed: {message}")]
    EncodeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A color string is not a `#rrggbb` hex triple
    #[error("Invalid hex color: {value:?}")]
    InvalidColor { value: String },

    /// OpenCV operation failed
    #[error("OpenCV error: {operation}")]
    OpenCvError {
        operation: String,
        #[source]
        source: Option<opencv::Error>,
    },

    /// Configuration could not be read or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Generic processing error
    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

impl ScanError {
    /// Create an invalid image error with context
    pub fn invalid_image<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InvalidImage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an encoding error with context
    pub fn encode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::EncodeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an OpenCV error with context
    pub fn opencv(operation: impl Into<String>, source: opencv::Error) -> Self {
        Self::OpenCvError {
            operation: operation.into(),
            source: Some(source),
        }
    }

    /// Whether the caller supplied bad input (as opposed to an internal failure)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScanError::InvalidImage { .. }
                | ScanError::InvalidColor { .. }
                | ScanError::InvalidParameter { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            ScanError::InvalidImage { .. } => {
                "Could not read the photo. Please upload a JPEG, PNG or WebP image.".to_string()
            }
            ScanError::InvalidColor { value } => {
                format!("'{}' is not a valid color. Use the #rrggbb format.", value)
            }
            ScanError::InvalidParameter { parameter, .. } => {
                format!("The value supplied for '{}' is not valid.", parameter)
            }
            _ => "Garment processing failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_image_is_client_error() {
        let err = ScanError::InvalidImage {
            message: "empty buffer".into(),
            source: None,
        };
        assert!(err.is_client_error());
        assert!(err.to_string().contains("empty buffer"));
    }

    #[test]
    fn test_internal_errors_are_not_client_errors() {
        let err = ScanError::ProcessingError {
            message: "boom".into(),
        };
        assert!(!err.is_client_error());
        assert_eq!(
            err.user_message(),
            "Garment processing failed. Please try again."
        );
    }

    #[test]
    fn test_invalid_color_message_names_value() {
        let err = ScanError::InvalidColor {
            value: "#12".into(),
        };
        assert!(err.user_message().contains("#12"));
    }
}
