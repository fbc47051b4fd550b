//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM backend failure (network, auth); fatal for the run, never retried
    #[error("Provider error: {0}")]
    Provider(String),

    /// No parseable JSON found in the model response
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Decoded object violates the extraction schema
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Whether the retry loop may charge this failure to an attempt and
    /// try again. Only the extractor's own parse and validation failures
    /// are recoverable; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExtractorError::InvalidFormat(_)
                | ExtractorError::JsonParse(_)
                | ExtractorError::Validation(_)
        )
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
