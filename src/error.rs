//! Error handling for Splicer
//!
//! Every operation validates fully before it mutates, so each variant
//! here describes a call that was rejected whole: nothing was written
//! and no refresh was requested.

use thiserror::Error;

/// Result type alias for Splicer operations
pub type Result<T> = std::result::Result<T, SpliceError>;

/// Main error type for Splicer operations
#[derive(Error, Debug)]
pub enum SpliceError {
    // Buffer Resolution Errors
    #[error("\"{name}\" is not a valid buffer")]
    BufferNotFound { name: String },

    #[error("buffer \"{name}\" has no readable sample storage")]
    BufferUnreadable { name: String },

    // Argument Validation Errors
    #[error("{start} and {end} are not a valid frame range")]
    InvalidRange { start: i64, end: i64 },

    #[error("shuffle width must be a positive frame count, got {width}")]
    InvalidWidth { width: i64 },

    #[error("{selector} does not select a buffer (0 selects A, positive selects B)")]
    InvalidTarget { selector: f64 },

    // Resource Errors
    #[error("cannot allocate {bytes} bytes of swap scratch")]
    AllocationFailure { bytes: usize },

    // Control Surface Errors
    #[error("unknown operation \"{selector}\"")]
    UnknownOperation { selector: String },

    #[error("bad message for \"{selector}\": {reason}")]
    BadMessage { selector: String, reason: String },

    // Audio File Errors
    #[error("invalid audio file: {reason}")]
    InvalidAudio { reason: String },

    #[error("unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SpliceError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SpliceError::BufferNotFound { .. } => "BUFFER_NOT_FOUND",
            SpliceError::BufferUnreadable { .. } => "BUFFER_UNREADABLE",
            SpliceError::InvalidRange { .. } => "INVALID_RANGE",
            SpliceError::InvalidWidth { .. } => "INVALID_WIDTH",
            SpliceError::InvalidTarget { .. } => "INVALID_TARGET",
            SpliceError::AllocationFailure { .. } => "ALLOCATION_FAILURE",
            SpliceError::UnknownOperation { .. } => "UNKNOWN_OPERATION",
            SpliceError::BadMessage { .. } => "BAD_MESSAGE",
            SpliceError::InvalidAudio { .. } => "INVALID_AUDIO",
            SpliceError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            SpliceError::Io(_) => "IO_ERROR",
            SpliceError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// True for errors raised by bad call arguments rather than host state
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            SpliceError::InvalidRange { .. }
                | SpliceError::InvalidWidth { .. }
                | SpliceError::InvalidTarget { .. }
                | SpliceError::BadMessage { .. }
        )
    }
}
