//! Error types for timecode operations.

use framecode_core::Rational;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for timecode operations.
pub type Result<T> = std::result::Result<T, TimecodeError>;

/// Errors that can occur during timecode operations.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimecodeError {
    /// Invalid timecode format in string.
    #[error("Invalid timecode format: {message}")]
    InvalidFormat {
        /// Description of the format error.
        message: String,
    },

    /// Frame rate that does not yield a positive fps.
    #[error("Invalid frame rate: {numerator}/{denominator} (minimum 1 fps)")]
    InvalidFrameRate {
        /// Frame rate numerator.
        numerator: i64,
        /// Frame rate denominator.
        denominator: i64,
    },

    /// Unsupported frame rate for operation.
    #[error("Unsupported frame rate for {operation}: {fps} fps")]
    UnsupportedFrameRate {
        /// The operation that doesn't support this frame rate.
        operation: String,
        /// The integer fps derived from the rate.
        fps: i64,
    },

    /// Overflow while computing a frame number.
    #[error("Timecode overflow")]
    Overflow,
}

impl TimecodeError {
    /// Create an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an invalid frame rate error.
    pub fn invalid_frame_rate(rate: Rational) -> Self {
        Self::InvalidFrameRate {
            numerator: rate.num,
            denominator: rate.den,
        }
    }

    /// Create an unsupported frame rate error.
    pub fn unsupported_frame_rate(operation: impl Into<String>, fps: i64) -> Self {
        Self::UnsupportedFrameRate {
            operation: operation.into(),
            fps,
        }
    }
}
