//! Minutes LLM Provider Layer
//!
//! Pluggable LLM backend implementations for the extraction pipeline.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `minutes-domain`:
//!
//! - `MockProvider`: deterministic mock for testing
//! - `GatewayProvider`: OpenAI-compatible chat-completions gateway
//!
//! # Examples
//!
//! ```
//! use minutes_llm::MockProvider;
//! use minutes_domain::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("system", "user").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod gateway;

use minutes_domain::LlmProvider as LlmProviderTrait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gateway::{resolve_base_url, GatewayProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A scripted mock reply.
#[derive(Debug)]
enum ScriptedReply {
    Text(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// Replies are scripted as a queue: each `generate` call pops the next
/// scripted reply, falling back to the fixed default once the queue is
/// drained. This makes retry behavior testable (first reply malformed,
/// second reply valid) without any network access.
///
/// # Examples
///
/// ```
/// use minutes_llm::MockProvider;
/// use minutes_domain::LlmProvider;
///
/// let provider = MockProvider::new("default");
/// provider.push_response("first");
/// assert_eq!(provider.generate("s", "u").unwrap(), "first");
/// assert_eq!(provider.generate("s", "u").unwrap(), "default");
/// assert_eq!(provider.call_count(), 2);
/// ```
///
/// Clones share the script queue and call counter, so a test can hand the
/// provider to the pipeline and keep a handle for assertions.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    scripted: Arc<Mutex<VecDeque<ScriptedReply>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            scripted: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a response for the next unanswered call
    pub fn push_response(&self, response: impl Into<String>) {
        self.scripted
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Text(response.into()));
    }

    /// Queue a transport failure for the next unanswered call
    pub fn push_error(&self, message: impl Into<String>) {
        self.scripted
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Error(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        match self.scripted.lock().unwrap().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Error(message)) => Err(LlmError::Communication(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}
