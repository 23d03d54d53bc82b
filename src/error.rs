//! Error types for pfield.
//!
//! The simulation itself never fails: degenerate surfaces just produce an
//! empty field. Errors only come from the edges of the crate, loading a
//! config file and exporting rendered frames.

use std::fmt;

/// Errors from config I/O and frame export.
#[derive(Debug)]
pub enum FieldError {
    /// Failed to read or write a file.
    Io(std::io::Error),
    /// Config JSON was malformed or had the wrong shape.
    Config(serde_json::Error),
    /// Failed to encode or save an image.
    Image(image::ImageError),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Io(e) => write!(f, "File I/O failed: {}", e),
            FieldError::Config(e) => write!(f, "Invalid field config: {}", e),
            FieldError::Image(e) => write!(f, "Failed to write image: {}", e),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::Io(e) => Some(e),
            FieldError::Config(e) => Some(e),
            FieldError::Image(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for FieldError {
    fn from(e: std::io::Error) -> Self {
        FieldError::Io(e)
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(e: serde_json::Error) -> Self {
        FieldError::Config(e)
    }
}

impl From<image::ImageError> for FieldError {
    fn from(e: image::ImageError) -> Self {
        FieldError::Image(e)
    }
}
