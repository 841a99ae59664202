//! Error types for seastate.

use thiserror::Error;

/// Result type alias for seastate operations.
pub type Result<T> = std::result::Result<T, SeastateError>;

/// Errors that can abort a download run.
#[derive(Error, Debug)]
pub enum SeastateError {
    /// A command-line timestamp could not be parsed.
    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    /// Retrieval service credentials or settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The retrieval service rejected or failed a request.
    #[error("Retrieval service error: {0}")]
    Api(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error for malformed `YYYYMMDDHHMMSS` timestamps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The input is not exactly fourteen characters long.
    #[error("Invalid timestamp '{input}': expected 14 digits (YYYYMMDDHHMMSS), got {len} characters")]
    Length {
        /// The rejected input.
        input: String,
        /// Its length in characters.
        len: usize,
    },

    /// The input has the right length but is not a valid date and time.
    #[error("Invalid timestamp '{input}': {source}")]
    Invalid {
        /// The rejected input.
        input: String,
        /// The underlying chrono parse error.
        source: chrono::ParseError,
    },
}

/// Error for unknown output format names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown data format: {0}. Valid options: grib, netcdf")]
pub struct DataFormatError(pub String);
