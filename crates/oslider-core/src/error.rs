//! Error types for slider configuration.

use crate::ColorParseError;
use thiserror::Error;

/// Errors raised when a slider is configured with unusable values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Range bounds are not ordered (`lower` must be below `upper`)
    #[error("invalid range: lower bound {lower} must be below upper bound {upper}")]
    InvalidRange {
        /// Requested lower bound
        lower: f32,
        /// Requested upper bound
        upper: f32,
    },

    /// Line height must be positive
    #[error("invalid line height {height}: must be greater than zero")]
    InvalidLineHeight {
        /// Requested line height
        height: f32,
    },

    /// A color string could not be parsed
    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),
}

/// Result type for slider operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidRange {
            lower: 1.0,
            upper: 0.0,
        };
        assert!(err.to_string().contains("lower bound 1"));

        let err = Error::InvalidLineHeight { height: 0.0 };
        assert!(err.to_string().contains("line height 0"));
    }

    #[test]
    fn test_error_from_color_parse() {
        let err: Error = ColorParseError::InvalidLength.into();
        assert!(matches!(err, Error::Color(ColorParseError::InvalidLength)));
        assert!(err.to_string().starts_with("invalid color"));
    }
}
