//! Error types for bindiff

use super::{ComparisonId, Side};
use thiserror::Error;

/// Error types for bindiff operations
#[derive(Debug, Error)]
pub enum BinDiffError {
    /// An input to a comparison or upload is empty or cannot be decoded
    #[error("Invalid argument ({side} payload): {reason}")]
    InvalidArgument { side: Side, reason: String },

    /// One or both payloads are missing for the requested comparison
    #[error("Comparison {id} not found: left and right payloads must both be uploaded")]
    NotFound { id: ComparisonId },

    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Payload store is in an unusable state
    #[error("Store error: {0}")]
    Store(String),

    /// Batch comparison pool failure
    #[error("Executor error: {0}")]
    Executor(String),
}

impl BinDiffError {
    /// Empty payload on the given side
    pub fn empty(side: Side) -> Self {
        BinDiffError::InvalidArgument {
            side,
            reason: "payload must not be empty".to_string(),
        }
    }

    /// Check if this error means the comparison is not available yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, BinDiffError::NotFound { .. })
    }

    /// Check if this error was caused by a rejected input
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, BinDiffError::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    // Automatic Conversion Tests (#[from] macro)

    #[test]
    fn test_io_error_automatic_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let error: BinDiffError = io_error.into();

        assert!(matches!(error, BinDiffError::Io(_)));
        assert!(error.to_string().contains("IO error"));
    }

    #[test]
    fn test_io_error_from_function() {
        fn returns_io_error() -> Result<(), BinDiffError> {
            let _file = std::fs::File::open("/nonexistent/path/payload.bin")?;
            Ok(())
        }

        let result = returns_io_error();
        assert!(matches!(result.unwrap_err(), BinDiffError::Io(_)));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<u64>("not json").unwrap_err();
        let error: BinDiffError = json_error.into();
        assert!(error.to_string().contains("Serialization error"));
    }

    // Variant Creation Tests

    #[test]
    fn test_empty_payload_error() {
        let error = BinDiffError::empty(Side::Right);
        assert!(error.is_invalid_argument());
        assert!(error.to_string().contains("right payload"));
        assert!(error.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_not_found() {
        let error = BinDiffError::NotFound { id: 42 };
        assert!(error.to_string().contains("Comparison 42 not found"));
        assert!(error.is_not_found());
        assert!(!error.is_invalid_argument());
    }

    #[test]
    fn test_config_error() {
        let error = BinDiffError::Config("workers must be positive".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(!error.is_not_found());
    }

    // Helper Method Tests

    #[test]
    fn test_invalid_argument_predicates() {
        assert!(BinDiffError::empty(Side::Left).is_invalid_argument());
        assert!(!BinDiffError::empty(Side::Left).is_not_found());
    }

    #[test]
    fn test_result_propagation() {
        fn inner_function() -> Result<(), BinDiffError> {
            Err(BinDiffError::Store("lock poisoned".to_string()))
        }

        fn outer_function() -> Result<(), BinDiffError> {
            inner_function()?;
            Ok(())
        }

        assert!(matches!(outer_function().unwrap_err(), BinDiffError::Store(_)));
    }
}
