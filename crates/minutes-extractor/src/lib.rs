//! Minutes Extractor
//!
//! Converts meeting-style transcripts into structured knowledge using an
//! LLM backend.
//!
//! # Architecture
//!
//! ```text
//! Transcript → Chunker → [LLM call per chunk, bounded retries] → Merger → Cleanup
//! ```
//!
//! # Key Features
//!
//! - **Boundary-aware chunking**: long transcripts split into overlapping,
//!   paragraph-aligned chunks
//! - **Bounded retries**: malformed model output is retried per chunk and
//!   degrades to an empty contribution, never failing the run
//! - **Similarity merge**: multi-chunk results merged with cross-category
//!   deduplication, first occurrence wins
//! - **Grounded cleanup**: owners normalized, filler stripped, rationale
//!   and dates checked against the source transcript
//!
//! # Example Usage
//!
//! ```no_run
//! use minutes_extractor::{Extractor, ExtractorConfig};
//! use minutes_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new(r#"{"tldr": "Nothing was discussed."}"#);
//! let extractor = Extractor::new(provider, ExtractorConfig::default())?;
//!
//! let result = extractor.process_transcript("User: hello").await?;
//! println!("{} decisions", result.decisions.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod cleanup;
mod config;
mod error;
mod extractor;
mod merge;
mod parser;
mod prompt;
mod similarity;


pub use chunking::chunk_transcript;
pub use cleanup::cleanup_result;
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use merge::merge_results;
pub use parser::extract_json_block;
pub use prompt::{
    build_user_prompt, result_schema_json, DEFAULT_EXTRACTION_PROMPT, DEFAULT_SYSTEM_PROMPT,
};
pub use similarity::similarity_ratio;
