//! Markdown session notes

use crate::OutputError;
use chrono::Local;
use minutes_domain::ExtractionResult;
use minutes_glossary::TermMatch;
use std::fs;
use std::path::{Path, PathBuf};

/// Run context rendered into the notes header.
#[derive(Debug, Clone)]
pub struct SessionMeta<'a> {
    /// Input file name as given on the command line
    pub input_file: &'a str,
    /// Backend identifier (e.g. the gateway model name)
    pub backend_name: &'a str,
    /// Input size description ("41 msgs" or "8123 chars")
    pub content_metric: &'a str,
}

/// Write the session notes markdown file, named by timestamp.
///
/// Returns the path of the file written. Sections are only emitted for
/// non-empty categories.
pub fn write_session_markdown(
    result: &ExtractionResult,
    meta: &SessionMeta<'_>,
    output_dir: &Path,
    file_hash: &str,
) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(output_dir)?;

    let now = Local::now();
    let filepath = output_dir.join(format!("{}.md", now.format("%Y-%m-%d-%H-%M-%S")));

    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Session Notes — {}", now.format("%Y-%m-%d %H:%M:%S")));
    lines.push(String::new());

    let hash_short = if file_hash.is_empty() {
        "unknown"
    } else {
        &file_hash[..file_hash.len().min(12)]
    };
    lines.push(format!(
        "**Input:** `{}` ({}, {})",
        meta.input_file, meta.backend_name, meta.content_metric
    ));
    lines.push(format!("**Hash:** `{}...` (new)", hash_short));
    lines.push(String::new());

    if !result.tldr.is_empty() {
        lines.push("## TLDR".to_string());
        lines.push(result.tldr.clone());
        lines.push(String::new());
    }

    if !result.decisions.is_empty() {
        lines.push("## Decisions".to_string());
        for (i, decision) in result.decisions.iter().enumerate() {
            let reason_text = if decision.rationale.is_empty() {
                String::new()
            } else {
                format!("reason: {}", decision.rationale)
            };
            let owner_text = if decision.owner.is_empty() {
                String::new()
            } else {
                format!(", owner: {}", decision.owner)
            };
            let extra = format!("({}{})", reason_text, owner_text);
            lines.push(
                format!("{}. {} {}", i + 1, decision.summary, extra)
                    .trim_end()
                    .to_string(),
            );
        }
        lines.push(String::new());
    }

    if !result.ideas.is_empty() {
        lines.push("## Ideas".to_string());
        for (i, idea) in result.ideas.iter().enumerate() {
            lines.push(format!(
                "{}. **{}** — {}: {}",
                i + 1,
                idea.title,
                idea.category,
                idea.description
            ));
        }
        lines.push(String::new());
    }

    if !result.questions.is_empty() {
        lines.push("## Questions".to_string());
        for (i, question) in result.questions.iter().enumerate() {
            let context_text = if question.context.is_empty() {
                String::new()
            } else {
                format!("(context: {})", question.context)
            };
            lines.push(
                format!("{}. {} {}", i + 1, question.text, context_text)
                    .trim_end()
                    .to_string(),
            );
        }
        lines.push(String::new());
    }

    if !result.action_items.is_empty() {
        lines.push("## Action Items".to_string());
        for action in &result.action_items {
            let owner_text = if action.owner.is_empty() {
                "Owner: Unassigned".to_string()
            } else {
                format!("Owner: {}", action.owner)
            };
            let due_text = if action.deadline.is_empty() {
                String::new()
            } else {
                format!(", Due: {}", action.deadline)
            };
            lines.push(format!(
                "- [ ] {} — {}{}",
                action.description, owner_text, due_text
            ));
        }
        lines.push(String::new());
    }

    if !result.concepts.is_empty() {
        lines.push("## Concepts".to_string());
        for concept in &result.concepts {
            lines.push(format!("- **{}:** {}", concept.name, concept.definition));
        }
        lines.push(String::new());
    }

    if !result.terms.is_empty() {
        lines.push("## Terminology".to_string());
        for term in &result.terms {
            let context_text = if term.context.is_empty() {
                String::new()
            } else {
                format!(" ({})", term.context)
            };
            lines.push(format!(
                "- **{}:** {}{}",
                term.term, term.definition, context_text
            ));
        }
        lines.push(String::new());
    }

    let content = format!("{}\n", lines.join("\n").trim_end());
    fs::write(&filepath, content)?;

    Ok(filepath)
}

/// Append a Glossary Cross-Reference section to existing session notes.
pub fn add_glossary_section(
    markdown_path: &Path,
    matches: &[TermMatch],
    unknown: &[TermMatch],
) -> Result<(), OutputError> {
    let mut lines = vec!["## Glossary Cross-Reference".to_string(), String::new()];

    for item in matches {
        lines.push(format!("- ✓ **{}** — matches known concept", item.term));
    }
    for item in unknown {
        lines.push(format!("- ? **{}** — unknown term (not in glossary)", item.term));
    }

    let mut content = fs::read_to_string(markdown_path)?;
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content.push('\n');
    content.push_str(&lines.join("\n"));
    content.push('\n');

    fs::write(markdown_path, content)?;
    Ok(())
}
