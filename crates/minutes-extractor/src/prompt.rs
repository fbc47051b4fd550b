//! Extraction prompt templates and substitution
//!
//! The user prompt is a template with `{schema}` and `{transcript}`
//! placeholders; the schema is generated from the domain types so the
//! prompt and serde validation cannot drift apart.

use minutes_domain::ExtractionResult;
use schemars::schema_for;

/// Default system prompt sent with every extraction call.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an expert at analyzing meeting transcripts and strategic planning sessions.
Your job is to extract structured knowledge: decisions, ideas, questions, action items,
concepts, and terminology. Be precise and concise. Only extract items explicitly discussed;
do not infer unstated decisions. For each category, maintain the original context and
attribution where possible.";

/// Default user prompt template.
pub const DEFAULT_EXTRACTION_PROMPT: &str = "\
Analyze this transcript and extract structured knowledge.

Respond with ONLY a valid JSON object matching this schema:
{schema}

Transcript:
{transcript}

Be literal; do not embellish or infer.";

/// JSON Schema of [`ExtractionResult`], serialized for prompt insertion.
pub fn result_schema_json() -> String {
    let schema = schema_for!(ExtractionResult);
    serde_json::to_string(&schema).expect("schema serialization is infallible")
}

/// Substitute the schema and chunk text into the prompt template.
pub fn build_user_prompt(template: &str, schema_json: &str, transcript: &str) -> String {
    template
        .replace("{schema}", schema_json)
        .replace("{transcript}", transcript)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mentions_all_categories() {
        let schema = result_schema_json();
        for field in [
            "decisions",
            "ideas",
            "questions",
            "action_items",
            "concepts",
            "terms",
            "tldr",
        ] {
            assert!(schema.contains(field), "schema is missing {}", field);
        }
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema = result_schema_json();
        assert!(serde_json::from_str::<serde_json::Value>(&schema).is_ok());
    }

    #[test]
    fn test_build_user_prompt_substitutes_both_placeholders() {
        let prompt = build_user_prompt(DEFAULT_EXTRACTION_PROMPT, "{\"type\": \"object\"}", "User: hi");
        assert!(prompt.contains("{\"type\": \"object\"}"));
        assert!(prompt.contains("User: hi"));
        assert!(!prompt.contains("{schema}"));
        assert!(!prompt.contains("{transcript}"));
    }

    #[test]
    fn test_default_prompt_has_placeholders() {
        assert!(DEFAULT_EXTRACTION_PROMPT.contains("{schema}"));
        assert!(DEFAULT_EXTRACTION_PROMPT.contains("{transcript}"));
    }
}
