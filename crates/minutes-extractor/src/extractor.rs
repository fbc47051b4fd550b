//! Core Extractor implementation

use crate::chunking::chunk_transcript;
use crate::cleanup::cleanup_result;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::merge::merge_results;
use crate::parser::extract_json_block;
use crate::prompt::{build_user_prompt, result_schema_json};
use minutes_domain::{ExtractionResult, LlmProvider};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The Extractor converts transcripts into structured knowledge
pub struct Extractor<L>
where
    L: LlmProvider,
{
    provider: Arc<L>,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new Extractor
    pub fn new(provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            provider: Arc::new(provider),
            config,
        })
    }

    /// Extract structured knowledge from one chunk of text.
    ///
    /// Each attempt calls the backend, locates the JSON payload, and
    /// decodes it against the schema. Parse and validation failures are
    /// retried up to `max_retries` times, after which the chunk degrades
    /// to an empty result. Backend failures abort immediately: a gateway
    /// that is down will not come back for a different prompt.
    pub async fn extract_structured(
        &self,
        chunk_text: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        let schema = result_schema_json();
        let user_prompt = build_user_prompt(&self.config.extraction_prompt, &schema, chunk_text);

        for attempt in 1..=self.config.max_retries {
            let response = self.call_provider(&user_prompt).await?;

            debug!(attempt, response_len = response.len(), "parsing model response");

            match parse_result(&response) {
                Ok(result) => {
                    debug!(attempt, "extraction succeeded");
                    return Ok(result);
                }
                Err(e) if e.is_recoverable() => {
                    warn!(attempt, error = %e, "extraction attempt failed");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            retries = self.config.max_retries,
            "extraction failed after all attempts, returning empty result"
        );
        Ok(ExtractionResult::default())
    }

    /// Process a whole transcript: chunk if necessary, extract, merge,
    /// and clean up against the full original transcript.
    pub async fn process_transcript(
        &self,
        transcript: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        if transcript.is_empty() {
            return Ok(ExtractionResult::default());
        }

        if transcript.len() <= self.config.max_chunk_size {
            let result = self.extract_structured(transcript).await?;
            return Ok(cleanup_result(result, transcript));
        }

        let chunks = chunk_transcript(
            transcript,
            self.config.max_chunk_size,
            self.config.chunk_overlap,
        );
        info!(chunks = chunks.len(), "transcript exceeds max chunk size, chunking");

        let mut results = Vec::with_capacity(chunks.len());
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("processing chunk {}/{}", idx + 1, chunks.len());
            results.push(self.extract_structured(chunk).await?);
        }

        let merged = merge_results(results);
        Ok(cleanup_result(merged, transcript))
    }

    /// Call the LLM provider
    async fn call_provider(&self, user_prompt: &str) -> Result<String, ExtractorError> {
        let provider = Arc::clone(&self.provider);
        let system_prompt = self.config.system_prompt.clone();
        let user_prompt = user_prompt.to_string();

        // Call in a blocking context since LlmProvider is not async
        tokio::task::spawn_blocking(move || {
            provider
                .generate(&system_prompt, &user_prompt)
                .map_err(|e| ExtractorError::Provider(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Provider(format!("Task join error: {}", e)))?
    }
}

/// Decode one model response into a validated result.
fn parse_result(response: &str) -> Result<ExtractionResult, ExtractorError> {
    let json_str = extract_json_block(response)?;
    let result: ExtractionResult = serde_json::from_str(&json_str)?;
    result.validate().map_err(ExtractorError::Validation)?;
    Ok(result)
}
