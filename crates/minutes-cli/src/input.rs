//! Transcript input parsing.
//!
//! Two formats: JSONL interaction logs (one JSON object per line, of
//! which only user/assistant messages with text content matter) and plain
//! text. Unknown extensions try JSONL first and fall back to text.

use crate::error::{CliError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Input format detected while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSONL interaction log
    Jsonl,
    /// Plain text
    Text,
}

/// What was read, and how much of it.
#[derive(Debug, Clone)]
pub struct InputMetadata {
    /// Detected format
    pub format: InputFormat,
    /// Messages extracted (JSONL only)
    pub messages: usize,
    /// Unparseable lines skipped (JSONL only)
    pub skipped: usize,
    /// Character count (text only)
    pub chars: usize,
}

impl InputMetadata {
    /// Human-readable size of the input ("41 msgs" / "8123 chars").
    pub fn content_metric(&self) -> String {
        match self.format {
            InputFormat::Jsonl => format!("{} msgs", self.messages),
            InputFormat::Text => format!("{} chars", self.chars),
        }
    }
}

/// Parse an input file, detecting the format from its extension.
///
/// A missing file is a fatal error.
pub fn parse_file(path: &Path) -> Result<(String, InputMetadata)> {
    if !path.exists() {
        return Err(CliError::Input(format!("File not found: {}", path.display())));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jsonl" => parse_jsonl(path),
        "txt" | "md" | "markdown" => parse_text(path),
        _ => {
            // Unknown extension: treat as an interaction log if any
            // messages parse, otherwise as plain text.
            let (text, metadata) = parse_jsonl(path)?;
            if metadata.messages > 0 {
                Ok((text, metadata))
            } else {
                parse_text(path)
            }
        }
    }
}

/// Parse a JSONL interaction log into labelled conversation text.
///
/// Each line is a JSON object; only objects carrying a `message` with a
/// user or assistant role contribute. Message content is either a string
/// or a list of blocks, of which only `"type": "text"` blocks are kept
/// (tool calls and their results are noise for extraction). Unparseable
/// lines are counted, not fatal.
pub fn parse_jsonl(path: &Path) -> Result<(String, InputMetadata)> {
    let contents = fs::read_to_string(path)?;

    let mut messages: Vec<String> = Vec::new();
    let mut skipped = 0usize;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let obj: Value = match serde_json::from_str(line) {
            Ok(obj) => obj,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        // Skip non-message events (progress, snapshots, tool results).
        let Some(message) = obj.get("message").and_then(|m| m.as_object()) else {
            continue;
        };

        let role = message.get("role").and_then(|r| r.as_str());
        let label = match role {
            Some("user") => "User:",
            Some("assistant") => "Assistant:",
            _ => continue,
        };

        let text = match message.get("content") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(blocks)) => blocks
                .iter()
                .filter(|b| b.get("type").and_then(|t| t.as_str()) == Some("text"))
                .filter_map(|b| b.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
                .join(""),
            _ => continue,
        };

        if text.trim().is_empty() {
            continue;
        }

        messages.push(format!("{} {}", label, text));
    }

    let metadata = InputMetadata {
        format: InputFormat::Jsonl,
        messages: messages.len(),
        skipped,
        chars: 0,
    };

    Ok((messages.join("\n\n"), metadata))
}

/// Read a plain text file.
pub fn parse_text(path: &Path) -> Result<(String, InputMetadata)> {
    let contents = fs::read_to_string(path)?;
    let metadata = InputMetadata {
        format: InputFormat::Text,
        messages: 0,
        skipped: 0,
        chars: contents.chars().count(),
    };
    Ok((contents, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_file(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = parse_file(Path::new("/no/such/transcript.jsonl"));
        assert!(matches!(result, Err(CliError::Input(_))));
    }

    #[test]
    fn test_plain_text_parsing() {
        let (_dir, path) = write_file("notes.txt", "We decided to use gRPC.");
        let (text, metadata) = parse_file(&path).unwrap();

        assert_eq!(text, "We decided to use gRPC.");
        assert_eq!(metadata.format, InputFormat::Text);
        assert_eq!(metadata.content_metric(), "23 chars");
    }

    #[test]
    fn test_jsonl_string_content() {
        let (_dir, path) = write_file(
            "log.jsonl",
            r#"{"message": {"role": "user", "content": "hello"}}
{"message": {"role": "assistant", "content": "hi there"}}
"#,
        );
        let (text, metadata) = parse_file(&path).unwrap();

        assert_eq!(text, "User: hello\n\nAssistant: hi there");
        assert_eq!(metadata.messages, 2);
        assert_eq!(metadata.skipped, 0);
        assert_eq!(metadata.content_metric(), "2 msgs");
    }

    #[test]
    fn test_jsonl_block_content_filters_tool_use() {
        let (_dir, path) = write_file(
            "log.jsonl",
            r#"{"message": {"role": "assistant", "content": [{"type": "text", "text": "part one "}, {"type": "tool_use", "name": "grep"}, {"type": "text", "text": "part two"}]}}
"#,
        );
        let (text, metadata) = parse_file(&path).unwrap();

        assert_eq!(text, "Assistant: part one part two");
        assert_eq!(metadata.messages, 1);
    }

    #[test]
    fn test_jsonl_skips_non_message_events() {
        let (_dir, path) = write_file(
            "log.jsonl",
            r#"{"type": "progress", "value": 10}
{"message": {"role": "system", "content": "ignored"}}
{"message": {"role": "user", "content": "kept"}}
{"message": {"role": "user", "content": "   "}}
"#,
        );
        let (text, metadata) = parse_file(&path).unwrap();

        assert_eq!(text, "User: kept");
        assert_eq!(metadata.messages, 1);
        assert_eq!(metadata.skipped, 0);
    }

    #[test]
    fn test_jsonl_counts_bad_lines() {
        let (_dir, path) = write_file(
            "log.jsonl",
            "not json at all\n{\"message\": {\"role\": \"user\", \"content\": \"ok\"}}\n",
        );
        let (_text, metadata) = parse_file(&path).unwrap();

        assert_eq!(metadata.messages, 1);
        assert_eq!(metadata.skipped, 1);
    }

    #[test]
    fn test_unknown_extension_detects_jsonl() {
        let (_dir, path) = write_file(
            "session.log2",
            r#"{"message": {"role": "user", "content": "from a log"}}"#,
        );
        let (text, metadata) = parse_file(&path).unwrap();

        assert_eq!(metadata.format, InputFormat::Jsonl);
        assert_eq!(text, "User: from a log");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_text() {
        let (_dir, path) = write_file("session.raw", "just ordinary prose\n");
        let (text, metadata) = parse_file(&path).unwrap();

        assert_eq!(metadata.format, InputFormat::Text);
        assert_eq!(text, "just ordinary prose\n");
    }
}
