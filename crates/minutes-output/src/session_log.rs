//! Running tab-separated session log

use crate::OutputError;
use chrono::Local;
use minutes_domain::ExtractionResult;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Append one line to `session.log` in the output directory.
///
/// Nine tab-separated fields: ISO timestamp, input file, content metric,
/// decision/idea/question/action counts, 12-char hash, cached/new status.
pub fn append_session_log(
    output_dir: &Path,
    input_file: &str,
    content_metric: &str,
    result: &ExtractionResult,
    file_hash: &str,
    is_cached: bool,
) -> Result<(), OutputError> {
    fs::create_dir_all(output_dir)?;

    let hash_short = if file_hash.is_empty() {
        "unknown"
    } else {
        &file_hash[..file_hash.len().min(12)]
    };

    let fields = [
        Local::now().to_rfc3339(),
        input_file.to_string(),
        content_metric.to_string(),
        result.decisions.len().to_string(),
        result.ideas.len().to_string(),
        result.questions.len().to_string(),
        result.action_items.len().to_string(),
        hash_short.to_string(),
        if is_cached { "cached" } else { "new" }.to_string(),
    ];

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_dir.join("session.log"))?;
    writeln!(file, "{}", fields.join("\t"))?;

    Ok(())
}
