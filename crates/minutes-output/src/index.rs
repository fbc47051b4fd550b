//! Cumulative JSON index of processed sessions

use crate::OutputError;
use chrono::Local;
use minutes_domain::ExtractionResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const INDEX_FILE: &str = "index.json";
const INDEX_VERSION: &str = "1.0";

/// Per-category item counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Decision count
    #[serde(default)]
    pub decisions: usize,
    /// Idea count
    #[serde(default)]
    pub ideas: usize,
    /// Question count
    #[serde(default)]
    pub questions: usize,
    /// Action item count
    #[serde(default)]
    pub action_items: usize,
    /// Concept count
    #[serde(default)]
    pub concepts: usize,
    /// Term count
    #[serde(default)]
    pub terms: usize,
}

impl IndexStats {
    fn of(result: &ExtractionResult) -> Self {
        Self {
            decisions: result.decisions.len(),
            ideas: result.ideas.len(),
            questions: result.questions.len(),
            action_items: result.action_items.len(),
            concepts: result.concepts.len(),
            terms: result.terms.len(),
        }
    }

    fn add(&mut self, other: &IndexStats) {
        self.decisions += other.decisions;
        self.ideas += other.ideas;
        self.questions += other.questions;
        self.action_items += other.action_items;
        self.concepts += other.concepts;
        self.terms += other.terms;
    }
}

/// One processed session in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    /// When the session was processed
    pub date: String,
    /// Input file name
    pub file: String,
    /// Truncated content-identity hash
    pub hash: String,
    /// Notes file the session produced
    pub output_file: String,
    /// Item counts for this session
    pub counts: IndexStats,
    /// Glossary terms matched
    #[serde(default)]
    pub glossary_matches: usize,
    /// Glossary terms unknown
    #[serde(default)]
    pub glossary_unknown: usize,
}

/// The cumulative session index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIndex {
    /// Index format version
    pub version: String,
    /// Last update timestamp
    pub generated: String,
    /// Number of sessions recorded
    pub total_sessions: usize,
    /// Aggregate counts across all sessions
    pub stats: IndexStats,
    /// Per-session entries
    pub sessions: Vec<SessionEntry>,
}

impl SessionIndex {
    fn new() -> Self {
        Self {
            version: INDEX_VERSION.to_string(),
            generated: Local::now().to_rfc3339(),
            total_sessions: 0,
            stats: IndexStats::default(),
            sessions: Vec::new(),
        }
    }

    /// Load the index from an output directory, or start a fresh one.
    pub fn load(output_dir: &Path) -> Result<Self, OutputError> {
        let path = output_dir.join(INDEX_FILE);
        if path.exists() {
            Ok(serde_json::from_str(&fs::read_to_string(&path)?)?)
        } else {
            Ok(Self::new())
        }
    }
}

/// Add one session to `index.json`, updating the aggregate stats.
///
/// The file is replaced atomically (temp + rename) so a concurrent reader
/// never sees a partial index.
pub fn update_index(
    output_dir: &Path,
    input_file: &str,
    result: &ExtractionResult,
    file_hash: &str,
    output_file: &str,
    glossary_matches: usize,
    glossary_unknown: usize,
) -> Result<(), OutputError> {
    fs::create_dir_all(output_dir)?;

    let mut index = SessionIndex::load(output_dir)?;

    let counts = IndexStats::of(result);
    index.stats.add(&counts);
    index.sessions.push(SessionEntry {
        date: Local::now().to_rfc3339(),
        file: input_file.to_string(),
        hash: file_hash[..file_hash.len().min(12)].to_string(),
        output_file: output_file.to_string(),
        counts,
        glossary_matches,
        glossary_unknown,
    });
    index.total_sessions = index.sessions.len();
    index.generated = Local::now().to_rfc3339();

    let path = output_dir.join(INDEX_FILE);
    let tmp_path = output_dir.join("index.json.tmp");
    fs::write(&tmp_path, serde_json::to_string_pretty(&index)?)?;
    fs::rename(&tmp_path, &path)?;

    Ok(())
}
