//! JSON extraction from model responses
//!
//! Models wrap JSON in markdown fences, tag the fence, or return it raw.
//! Candidates are located in a fixed priority order and validated where
//! they are found: a malformed candidate at an earlier step raises instead
//! of falling through, so the failure is charged to the retry loop.

use crate::error::ExtractorError;

/// Extract the JSON payload from a model response.
///
/// Priority order:
/// 1. a complete ```` ```json ```` fence,
/// 2. the first complete ```` ``` ```` fence,
/// 3. the whole trimmed text.
///
/// The first candidate found is validated as JSON and returned; invalid
/// contents at any step are an error, not a fallback. An opening fence
/// with no closing fence does not count as a candidate.
pub fn extract_json_block(text: &str) -> Result<String, ExtractorError> {
    let text = text.trim();

    if let Some(body) = fenced_block(text, "```json") {
        validate_json(&body)?;
        return Ok(body);
    }

    if let Some(body) = fenced_block(text, "```") {
        validate_json(&body)?;
        return Ok(body);
    }

    validate_json(text)?;
    Ok(text.to_string())
}

/// Contents of the first complete fence opened by `opener`, trimmed.
fn fenced_block(text: &str, opener: &str) -> Option<String> {
    let start = text.find(opener)? + opener.len();
    let len = text[start..].find("```")?;
    Some(text[start..start + len].trim().to_string())
}

fn validate_json(candidate: &str) -> Result<(), ExtractorError> {
    serde_json::from_str::<serde_json::Value>(candidate)
        .map(|_| ())
        .map_err(|e| ExtractorError::JsonParse(e.to_string()))
}
