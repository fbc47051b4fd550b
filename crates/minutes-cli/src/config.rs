//! Configuration management for the CLI.
//!
//! Settings come from environment variables with built-in defaults;
//! malformed values fall back to the default with a warning rather than
//! failing the run. `SYSTEM_PROMPT` and `EXTRACTION_PROMPT` accept either
//! an inline prompt or a path to a prompt file.

use minutes_extractor::{ExtractorConfig, DEFAULT_EXTRACTION_PROMPT, DEFAULT_SYSTEM_PROMPT};
use std::env;
use std::path::Path;
use tracing::warn;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model identifier routed through the gateway
    pub gateway_model: String,

    /// Configured gateway base address (environment may override it at
    /// resolution time)
    pub gateway_url: String,

    /// System prompt for extraction calls
    pub system_prompt: String,

    /// User prompt template for extraction calls
    pub extraction_prompt: String,

    /// Default output directory
    pub output_dir: String,

    /// Default glossary path; empty disables the cross-reference
    pub glossary_path: String,

    /// Maximum chunk size in characters
    pub max_chunk_size: usize,

    /// Overlap between adjacent chunks in characters
    pub chunk_overlap: usize,

    /// Extraction attempts per chunk
    pub max_retries: u32,

    /// Memory service base URL; empty disables the pipe
    pub automem_endpoint: String,

    /// Memory service API key; empty disables the pipe
    pub automem_api_key: String,
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Self {
        Self {
            gateway_model: env_or("GATEWAY_MODEL", "qwen3-4b"),
            gateway_url: env_or("GATEWAY_URL", "http://localhost:8800/v1"),
            system_prompt: resolve_prompt("SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT),
            extraction_prompt: resolve_prompt("EXTRACTION_PROMPT", DEFAULT_EXTRACTION_PROMPT),
            output_dir: env_or("OUTPUT_DIR", "./output/"),
            glossary_path: env_or("GLOSSARY_PATH", ""),
            max_chunk_size: env_parsed("MAX_CHUNK_SIZE", 12_000),
            chunk_overlap: env_parsed("CHUNK_OVERLAP", 200),
            max_retries: env_parsed("MAX_RETRIES", 3),
            automem_endpoint: env_or("AUTOMEM_ENDPOINT", ""),
            automem_api_key: env_or("AUTOMEM_API_KEY", ""),
        }
    }

    /// Extractor configuration derived from these settings.
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            max_chunk_size: self.max_chunk_size,
            chunk_overlap: self.chunk_overlap,
            max_retries: self.max_retries,
            system_prompt: self.system_prompt.clone(),
            extraction_prompt: self.extraction_prompt.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_model: "qwen3-4b".to_string(),
            gateway_url: "http://localhost:8800/v1".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            extraction_prompt: DEFAULT_EXTRACTION_PROMPT.to_string(),
            output_dir: "./output/".to_string(),
            glossary_path: String::new(),
            max_chunk_size: 12_000,
            chunk_overlap: 200,
            max_retries: 3,
            automem_endpoint: String::new(),
            automem_api_key: String::new(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!(var = name, value = %value, "ignoring unparseable value, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Resolve a prompt setting: a value naming an existing file is read from
/// that file, anything else is used inline, unset means the default.
fn resolve_prompt(name: &str, default: &str) -> String {
    let Ok(value) = env::var(name) else {
        return default.to_string();
    };

    let path = Path::new(&value);
    if path.is_file() {
        match std::fs::read_to_string(path) {
            Ok(contents) => return contents,
            Err(e) => {
                warn!(var = name, error = %e, "failed to read prompt file, using value inline");
            }
        }
    }
    value
}
