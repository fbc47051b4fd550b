//! Minutes Glossary
//!
//! Loads a project glossary from YAML and cross-references extracted terms
//! and concepts against it. The glossary is an optional aid: a missing or
//! malformed file degrades to an empty glossary with a warning, never an
//! error.

#![warn(missing_docs)]

use minutes_domain::ExtractionResult;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// One glossary entry. Anything beyond the term itself is informational.
#[derive(Debug, Clone, PartialEq)]
pub struct GlossaryEntry {
    /// The canonical term
    pub term: String,
    /// Its definition, if the glossary provides one
    pub definition: String,
}

/// An extracted term cross-referenced against the glossary.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatch {
    /// The extracted text, original casing preserved
    pub term: String,
    /// Which extraction list it came from: "terms" or "concepts"
    pub source: &'static str,
}

/// Load a glossary from a YAML file.
///
/// Accepts either a top-level `terms:` list or a bare list; each entry is
/// a mapping with at least a `term` key. Any problem (missing file,
/// unparseable YAML, unexpected shape) yields an empty glossary.
pub fn load_glossary(path: &Path) -> Vec<GlossaryEntry> {
    if !path.exists() {
        warn!(path = %path.display(), "glossary file not found");
        return Vec::new();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read glossary");
            return Vec::new();
        }
    };

    let data: serde_yaml::Value = match serde_yaml::from_str(&contents) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse glossary YAML");
            return Vec::new();
        }
    };

    let entries: &[serde_yaml::Value] = match &data {
        serde_yaml::Value::Mapping(_) => match data.get("terms") {
            Some(serde_yaml::Value::Sequence(seq)) => seq,
            _ => &[],
        },
        serde_yaml::Value::Sequence(seq) => seq,
        _ => &[],
    };

    entries
        .iter()
        .map(|entry| GlossaryEntry {
            term: yaml_str(entry, "term"),
            definition: yaml_str(entry, "definition"),
        })
        .collect()
}

fn yaml_str(entry: &serde_yaml::Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Cross-reference extracted terms and concepts against the glossary.
///
/// Matching is a case-insensitive exact comparison. Returns the matched
/// and unknown entries, terms first, then concepts, original casing
/// preserved.
pub fn match_terms(
    extracted: &ExtractionResult,
    glossary: &[GlossaryEntry],
) -> (Vec<TermMatch>, Vec<TermMatch>) {
    let known: HashMap<String, &GlossaryEntry> = glossary
        .iter()
        .map(|entry| (entry.term.to_lowercase(), entry))
        .collect();

    let mut matched = Vec::new();
    let mut unknown = Vec::new();

    let candidates = extracted
        .terms
        .iter()
        .map(|t| (t.term.as_str(), "terms"))
        .chain(extracted.concepts.iter().map(|c| (c.name.as_str(), "concepts")));

    for (text, source) in candidates {
        let item = TermMatch {
            term: text.to_string(),
            source,
        };
        if known.contains_key(&text.to_lowercase()) {
            matched.push(item);
        } else {
            unknown.push(item);
        }
    }

    (matched, unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minutes_domain::{Concept, Term};
    use std::io::Write;
    use std::path::PathBuf;

    fn write_glossary(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glossary.yaml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    fn result_with_terms(terms: &[&str], concepts: &[&str]) -> ExtractionResult {
        ExtractionResult {
            terms: terms
                .iter()
                .map(|t| Term {
                    term: t.to_string(),
                    definition: String::new(),
                    context: String::new(),
                })
                .collect(),
            concepts: concepts
                .iter()
                .map(|c| Concept {
                    name: c.to_string(),
                    definition: String::new(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_terms_mapping() {
        let (_dir, path) = write_glossary(
            "terms:\n  - term: gRPC\n    definition: RPC framework\n  - term: SLO\n",
        );
        let glossary = load_glossary(&path);

        assert_eq!(glossary.len(), 2);
        assert_eq!(glossary[0].term, "gRPC");
        assert_eq!(glossary[0].definition, "RPC framework");
        assert_eq!(glossary[1].definition, "");
    }

    #[test]
    fn test_load_bare_list() {
        let (_dir, path) = write_glossary("- term: gRPC\n- term: SLO\n");
        let glossary = load_glossary(&path);
        assert_eq!(glossary.len(), 2);
    }

    #[test]
    fn test_missing_file_yields_empty() {
        assert!(load_glossary(Path::new("/no/such/glossary.yaml")).is_empty());
    }

    #[test]
    fn test_malformed_yaml_yields_empty() {
        let (_dir, path) = write_glossary("terms: [unclosed\n");
        assert!(load_glossary(&path).is_empty());
    }

    #[test]
    fn test_scalar_document_yields_empty() {
        let (_dir, path) = write_glossary("just a string\n");
        assert!(load_glossary(&path).is_empty());
    }

    #[test]
    fn test_mapping_without_terms_yields_empty() {
        let (_dir, path) = write_glossary("title: my glossary\n");
        assert!(load_glossary(&path).is_empty());
    }

    #[test]
    fn test_entry_without_term_key_kept_empty() {
        let (_dir, path) = write_glossary("- definition: orphan\n- term: gRPC\n");
        let glossary = load_glossary(&path);
        assert_eq!(glossary.len(), 2);
        assert_eq!(glossary[0].term, "");
    }

    #[test]
    fn test_match_terms_case_insensitive() {
        let glossary = vec![GlossaryEntry {
            term: "gRPC".to_string(),
            definition: String::new(),
        }];
        let extracted = result_with_terms(&["GRPC"], &[]);

        let (matched, unknown) = match_terms(&extracted, &glossary);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].term, "GRPC"); // original casing preserved
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_match_terms_sources_and_order() {
        let glossary = vec![GlossaryEntry {
            term: "event sourcing".to_string(),
            definition: String::new(),
        }];
        let extracted = result_with_terms(&["CQRS"], &["Event Sourcing"]);

        let (matched, unknown) = match_terms(&extracted, &glossary);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].source, "concepts");
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].source, "terms");
    }

    #[test]
    fn test_empty_glossary_marks_everything_unknown() {
        let extracted = result_with_terms(&["gRPC"], &["Sharding"]);
        let (matched, unknown) = match_terms(&extracted, &[]);

        assert!(matched.is_empty());
        assert_eq!(unknown.len(), 2);
        assert_eq!(unknown[0].term, "gRPC");
        assert_eq!(unknown[1].term, "Sharding");
    }
}
