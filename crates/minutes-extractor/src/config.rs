//! Configuration for the Extractor

use crate::prompt::{DEFAULT_EXTRACTION_PROMPT, DEFAULT_SYSTEM_PROMPT};
use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum chunk size (characters); transcripts above this are chunked
    pub max_chunk_size: usize,

    /// Character overlap between adjacent chunks
    pub chunk_overlap: usize,

    /// Attempts per chunk before degrading to an empty result
    pub max_retries: u32,

    /// System prompt sent with every extraction call
    pub system_prompt: String,

    /// User prompt template; must contain `{schema}` and `{transcript}`
    pub extraction_prompt: String,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chunk_size == 0 {
            return Err("max_chunk_size must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
        }
        if !self.extraction_prompt.contains("{schema}") {
            return Err("extraction_prompt is missing the {schema} placeholder".to_string());
        }
        if !self.extraction_prompt.contains("{transcript}") {
            return Err("extraction_prompt is missing the {transcript} placeholder".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 12_000,
            chunk_overlap: 200,
            max_retries: 3,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            extraction_prompt: DEFAULT_EXTRACTION_PROMPT.to_string(),
        }
    }
}
