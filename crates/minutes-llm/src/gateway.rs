//! Gateway Provider Implementation
//!
//! Talks to an OpenAI-compatible chat-completions endpoint (the local model
//! gateway). The transport owns the timeout: a hung request blocks the
//! caller until the client-level deadline fires, there is no extra
//! cancellation layer above it.
//!
//! # Examples
//!
//! ```no_run
//! use minutes_llm::GatewayProvider;
//!
//! let provider = GatewayProvider::new("http://localhost:8800/v1", "qwen3-4b");
//! // The generate method is async; the LlmProvider trait impl wraps it
//! // for blocking callers.
//! ```

use crate::LlmError;
use minutes_domain::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Default gateway base address (OpenAI-compatible v1 root)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8800/v1";

/// Fixed timeout for gateway requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Resolve the gateway base address.
///
/// Gateway discovery is environment glue, not pipeline logic: a gateway
/// managed outside this process advertises itself through the `GATEWAY_URL`
/// environment variable, and the configured address is the fallback. The
/// returned address has no trailing slash.
pub fn resolve_base_url(configured: &str) -> String {
    let resolved = match std::env::var("GATEWAY_URL") {
        Ok(url) if !url.trim().is_empty() => {
            info!(url = %url, "using gateway address from environment");
            url
        }
        _ => configured.to_string(),
    };
    resolved.trim_end_matches('/').to_string()
}

/// Chat-completions provider for the model gateway
pub struct GatewayProvider {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// A single chat message
#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl GatewayProvider {
    /// Create a new gateway provider
    ///
    /// # Parameters
    ///
    /// - `base_url`: gateway base address (e.g., "http://localhost:8800/v1")
    /// - `model`: model identifier the gateway routes to
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
        }
    }

    /// The model identifier this provider routes to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a completion for a system/user prompt pair
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway is unreachable, the model is
    /// unknown, or the response body does not contain a completion. These
    /// are fatal to an extraction run; only parse failures above this
    /// layer are retried.
    pub async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request_body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))
    }
}

impl LlmProviderTrait for GatewayProvider {
    type Error = LlmError;

    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, Self::Error> {
        // Blocking wrapper for async function
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async { self.generate(system_prompt, user_prompt).await })
    }
}
