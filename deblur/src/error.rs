use std::fmt;

use thiserror::Error;

/// Width and height of an image, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors surfaced by the restoration engine.
///
/// Near-zero denominators inside Richardson-Lucy are not errors: they are
/// floored locally and only counted in [`crate::RestoreStats`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Invalid argument `{what}`: {reason}")]
    InvalidArgument { what: &'static str, reason: String },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: Dimensions,
        actual: Dimensions,
    },
}

impl Error {
    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = Error::invalid("sigma", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid argument `sigma`: must be positive, got 0"
        );
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = Error::DimensionMismatch {
            expected: Dimensions::new(64, 48),
            actual: Dimensions::new(32, 48),
        };
        let msg = err.to_string();
        assert!(msg.contains("64x48"));
        assert!(msg.contains("32x48"));
    }
}
