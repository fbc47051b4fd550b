//! Minutes Memory Pipe
//!
//! Pushes extraction results into an AutoMem-compatible memory service
//! over REST: one POST per extracted item, tagged by category and session,
//! weighted by the category's fixed importance. The pipe is optional glue:
//! when the service is not configured the push is skipped silently, and
//! per-item HTTP failures are counted without aborting the loop.

#![warn(missing_docs)]

use minutes_domain::{Category, ExtractionResult};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed timeout for memory service requests
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the memory service.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    /// Service base URL; empty means not configured
    pub endpoint: String,
    /// Bearer token; empty means not configured
    pub api_key: String,
}

/// Result of a pipe operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipeOutcome {
    /// Service not configured; nothing was attempted
    Skipped {
        /// Why the push was skipped
        reason: String,
    },
    /// Push ran to completion (individual items may still have failed)
    Complete {
        /// Items stored successfully
        stored: usize,
        /// Items that failed with an HTTP error
        errors: usize,
    },
}

/// One item rendered for the memory service.
#[derive(Debug, Clone)]
struct MemoryRecord {
    content: String,
    extra_tags: Vec<String>,
}

/// Wire payload for `POST {endpoint}/memory`.
#[derive(Serialize)]
struct MemoryPayload<'a> {
    content: &'a str,
    tags: &'a [String],
    importance: f64,
    metadata: PayloadMetadata<'a>,
}

#[derive(Serialize)]
struct PayloadMetadata<'a> {
    source: &'static str,
    session_id: &'a str,
    category: &'static str,
}

/// Store extraction results in the memory service.
///
/// Missing endpoint or API key configuration is a silent skip, not an
/// error. Otherwise every item of every non-empty category is pushed in
/// category order; the outcome reports stored and failed counts.
pub async fn pipe_to_memory(
    result: &ExtractionResult,
    session_id: &str,
    project_key: &str,
    settings: &MemorySettings,
) -> PipeOutcome {
    if settings.endpoint.is_empty() || settings.api_key.is_empty() {
        debug!("memory service not configured, skipping pipe");
        return PipeOutcome::Skipped {
            reason: "not configured".to_string(),
        };
    }

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            return PipeOutcome::Skipped {
                reason: format!("http client: {}", e),
            }
        }
    };

    let url = format!("{}/memory", settings.endpoint.trim_end_matches('/'));
    let mut stored = 0usize;
    let mut errors = 0usize;

    for category in Category::ALL {
        let records = collect_records(result, category);
        for record in records {
            if record.content.is_empty() {
                continue;
            }

            let mut tags = vec![
                category.tag().to_string(),
                format!("session:{}", session_id),
                format!("project:{}", project_key),
            ];
            tags.extend(record.extra_tags);

            let payload = MemoryPayload {
                content: &record.content,
                tags: &tags,
                importance: category.importance(),
                metadata: PayloadMetadata {
                    source: "take-minutes",
                    session_id,
                    category: category.tag(),
                },
            };

            let response = client
                .post(&url)
                .bearer_auth(&settings.api_key)
                .json(&payload)
                .send()
                .await
                .and_then(|r| r.error_for_status());

            match response {
                Ok(_) => stored += 1,
                Err(e) => {
                    warn!(category = category.tag(), error = %e, "failed to store memory");
                    errors += 1;
                }
            }
        }
    }

    PipeOutcome::Complete { stored, errors }
}

/// Render every item of one category; the single place where category
/// formatting is decided.
fn collect_records(result: &ExtractionResult, category: Category) -> Vec<MemoryRecord> {
    match category {
        Category::Decision => result
            .decisions
            .iter()
            .map(|d| {
                let mut parts = vec![d.summary.clone()];
                if !d.rationale.is_empty() {
                    parts.push(format!("Rationale: {}", d.rationale));
                }
                if !d.owner.is_empty() {
                    parts.push(format!("Owner: {}", d.owner));
                }
                MemoryRecord {
                    content: parts.join(". "),
                    extra_tags: owner_tag(&d.owner),
                }
            })
            .collect(),

        Category::ActionItem => result
            .action_items
            .iter()
            .map(|a| {
                let mut parts = vec![format!("ACTION: {}", a.description)];
                if !a.owner.is_empty() {
                    parts.push(format!("Owner: {}", a.owner));
                }
                if !a.deadline.is_empty() {
                    parts.push(format!("Due: {}", a.deadline));
                }
                let mut extra_tags = owner_tag(&a.owner);
                if !a.deadline.is_empty() {
                    extra_tags.push("has-deadline".to_string());
                }
                MemoryRecord {
                    content: parts.join(". "),
                    extra_tags,
                }
            })
            .collect(),

        Category::Concept => result
            .concepts
            .iter()
            .map(|c| MemoryRecord {
                content: if c.definition.is_empty() {
                    c.name.clone()
                } else {
                    format!("{}. {}", c.name, c.definition)
                },
                extra_tags: Vec::new(),
            })
            .collect(),

        Category::Term => result
            .terms
            .iter()
            .map(|t| {
                let mut parts = vec![format!("TERM: {} — {}", t.term, t.definition)];
                if !t.context.is_empty() {
                    parts.push(format!("Context: {}", t.context));
                }
                MemoryRecord {
                    content: parts.join(". "),
                    extra_tags: Vec::new(),
                }
            })
            .collect(),

        Category::Idea => result
            .ideas
            .iter()
            .map(|i| {
                let mut parts = vec![i.title.clone()];
                if !i.description.is_empty() {
                    parts.push(i.description.clone());
                }
                if !i.category.is_empty() && i.category != "suggestion" {
                    parts.push(format!("Category: {}", i.category));
                }
                MemoryRecord {
                    content: parts.join(". "),
                    extra_tags: Vec::new(),
                }
            })
            .collect(),

        Category::Question => result
            .questions
            .iter()
            .map(|q| {
                let mut parts = vec![format!("QUESTION: {}", q.text)];
                if !q.context.is_empty() {
                    parts.push(format!("Context: {}", q.context));
                }
                MemoryRecord {
                    content: parts.join(". "),
                    extra_tags: owner_tag(&q.owner),
                }
            })
            .collect(),
    }
}

fn owner_tag(owner: &str) -> Vec<String> {
    if owner.is_empty() {
        Vec::new()
    } else {
        vec![format!("owner:{}", owner.trim().to_lowercase())]
    }
}
