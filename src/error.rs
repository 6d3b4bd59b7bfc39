//! Error types for email archiving

use thiserror::Error;

/// Errors that can occur while archiving an email.
///
/// The text transforms themselves are total; errors only come from the
/// edges of the pipeline (raw MIME input, size bounds, configuration).
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Failed to parse the raw message structure
    #[error("Failed to parse email structure: {0}")]
    Structure(String),

    /// Input exceeds the configured size bound
    #[error("Input too large for {field}: {actual} bytes (limit {limit})")]
    InputTooLarge {
        field: &'static str,
        limit: usize,
        actual: usize,
    },

    /// Invalid configuration document
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for archiving operations
pub type Result<T> = std::result::Result<T, ArchiveError>;
