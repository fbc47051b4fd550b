//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file missing or unreadable
    #[error("Input error: {0}")]
    Input(String),

    /// Extraction pipeline failure (backend down, bad configuration)
    #[error("Extraction error: {0}")]
    Extractor(#[from] minutes_extractor::ExtractorError),

    /// Dedup store failure
    #[error("Store error: {0}")]
    Store(#[from] minutes_store::StoreError),

    /// Output writing failure
    #[error("Output error: {0}")]
    Output(#[from] minutes_output::OutputError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
