//! Error types for readably-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading an input document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Io {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file exceeds the configured input limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// Path that was rejected.
        path: Utf8PathBuf,
        /// Size reported by the filesystem.
        size: u64,
        /// Configured limit.
        limit: usize,
    },

    /// The file extension does not map to a supported image type.
    #[error("unsupported image type: {path}. Use: {available}")]
    UnsupportedMediaType {
        /// Path that was rejected.
        path: Utf8PathBuf,
        /// Comma-separated list of supported extensions.
        available: String,
    },
}

/// Result type alias using [`DocumentError`].
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised while building or parsing assistant requests and sessions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssistError {
    /// The text payload is empty or whitespace-only.
    #[error("missing required parameter: text")]
    EmptyText,

    /// The image payload is empty.
    #[error("missing required parameter: imageData")]
    MissingImageData,

    /// An unknown simplification level was provided.
    #[error("unknown simplification level: {value}. Use: basic (1), intermediate (2), advanced (3)")]
    UnknownLevel {
        /// The value that was requested.
        value: String,
    },

    /// An unknown target language was provided.
    #[error("unknown language: {value}. Use: {available}")]
    UnknownLanguage {
        /// The value that was requested.
        value: String,
        /// Comma-separated list of supported language codes.
        available: String,
    },

    /// A speech rate outside the supported range.
    #[error("speech rate {rate} is outside 0.5..=2.0")]
    RateOutOfRange {
        /// The rate that was requested.
        rate: f64,
    },

    /// The upstream completion response had no message content.
    #[error("completion response contained no message content")]
    EmptyCompletion,
}

/// Result type alias using [`AssistError`].
pub type AssistResult<T> = Result<T, AssistError>;
