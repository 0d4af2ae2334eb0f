//! Error types for the framecode core crate.

use thiserror::Error;

/// Main error type for the core crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Text that does not describe a rational number.
    #[error("Invalid rational: {0}")]
    InvalidRational(String),
}

/// Result type alias using the core [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidRational("30000/".into());
        assert_eq!(err.to_string(), "Invalid rational: 30000/");
    }
}
