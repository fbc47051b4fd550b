//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction pipeline and
//! infrastructure. Implementations live in other crates.

/// Trait for LLM backend operations
///
/// Implemented by the infrastructure layer (minutes-llm). Errors from a
/// provider are transport-level failures; the extraction pipeline never
/// retries them, it retries only its own parse and validation failures.
pub trait LlmProvider {
    /// Error type for backend operations
    type Error;

    /// Generate a completion for a system/user prompt pair
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, Self::Error>;
}
