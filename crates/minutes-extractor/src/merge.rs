//! Merging multi-chunk extraction results
//!
//! Chunk results are concatenated in chunk order and deduplicated:
//! near-duplicates within Decisions/Ideas/Questions/ActionItems by text
//! similarity on the identifying field, Concepts/Terms by exact match.
//! Action items and ideas that restate a kept decision are dropped;
//! decisions are the canonical record. The first occurrence always wins.

use crate::similarity::similarity_ratio;
use minutes_domain::ExtractionResult;
use std::collections::HashSet;

/// Two items with at least this similarity on their comparison field are
/// duplicates.
const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Merge chunk results into one, deduplicating across chunks.
///
/// An empty input yields an empty result. A single-element input returns
/// that element's content unchanged: dedup only compares an item against
/// other already-kept items, never against itself.
pub fn merge_results(results: Vec<ExtractionResult>) -> ExtractionResult {
    if results.is_empty() {
        return ExtractionResult::default();
    }

    let mut decisions = Vec::new();
    let mut ideas = Vec::new();
    let mut questions = Vec::new();
    let mut action_items = Vec::new();
    let mut concepts = Vec::new();
    let mut terms = Vec::new();
    let mut tldrs = Vec::new();

    for result in results {
        decisions.extend(result.decisions);
        ideas.extend(result.ideas);
        questions.extend(result.questions);
        action_items.extend(result.action_items);
        concepts.extend(result.concepts);
        terms.extend(result.terms);
        tldrs.push(result.tldr);
    }

    let decisions = dedupe_by_similarity(decisions, |d| &d.summary);
    let ideas = dedupe_by_similarity(ideas, |i| &i.title);
    let questions = dedupe_by_similarity(questions, |q| &q.text);
    let action_items = dedupe_by_similarity(action_items, |a| &a.description);

    // Restating a decision as an action or idea is redundant.
    let decision_summaries: Vec<String> =
        decisions.iter().map(|d| d.summary.to_lowercase()).collect();
    let action_items = drop_restatements(action_items, |a| &a.description, &decision_summaries);
    let ideas = drop_restatements(ideas, |i| &i.title, &decision_summaries);

    let concepts = dedupe_exact(concepts, |c| &c.name);
    let terms = dedupe_exact(terms, |t| &t.term);

    // Longest non-empty summary wins; first among equals.
    let mut tldr = String::new();
    for candidate in tldrs {
        if !candidate.is_empty() && candidate.chars().count() > tldr.chars().count() {
            tldr = candidate;
        }
    }

    ExtractionResult {
        decisions,
        ideas,
        questions,
        action_items,
        concepts,
        terms,
        tldr,
    }
}

/// Keep the first of every group of near-duplicates.
///
/// Each item is compared against all previously kept items,
/// short-circuiting on the first match.
fn dedupe_by_similarity<T, F>(items: Vec<T>, field: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut kept: Vec<T> = Vec::new();
    for item in items {
        let is_duplicate = kept
            .iter()
            .any(|k| similarity_ratio(field(&item), field(k)) >= SIMILARITY_THRESHOLD);
        if !is_duplicate {
            kept.push(item);
        }
    }
    kept
}

/// Drop items whose field restates any reference text (case-insensitive).
fn drop_restatements<T, F>(items: Vec<T>, field: F, reference: &[String]) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    if reference.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| {
            let text = field(item).to_lowercase();
            !reference
                .iter()
                .any(|r| similarity_ratio(&text, r) >= SIMILARITY_THRESHOLD)
        })
        .collect()
}

/// Keep the first item for each exact field value.
fn dedupe_exact<T, F>(items: Vec<T>, field: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(field(item).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minutes_domain::{ActionItem, Concept, Decision, Idea, Term};

    fn decision(summary: &str) -> Decision {
        Decision {
            summary: summary.to_string(),
            owner: String::new(),
            rationale: String::new(),
            date: String::new(),
        }
    }

    fn action(description: &str) -> ActionItem {
        ActionItem {
            description: description.to_string(),
            owner: String::new(),
            deadline: String::new(),
        }
    }

    fn result_with_decisions(summaries: &[&str]) -> ExtractionResult {
        ExtractionResult {
            decisions: summaries.iter().map(|s| decision(s)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        assert!(merge_results(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_result_passes_through_unchanged() {
        let result = ExtractionResult {
            decisions: vec![decision("Use PostgreSQL"), decision("Ship in March")],
            tldr: "Two decisions.".to_string(),
            ..Default::default()
        };

        let merged = merge_results(vec![result.clone()]);
        assert_eq!(merged, result);
    }

    #[test]
    fn test_near_duplicate_decisions_keep_first() {
        let merged = merge_results(vec![
            result_with_decisions(&["Use PostgreSQL for the database"]),
            result_with_decisions(&["Use PostgreSQL for database"]),
        ]);

        assert_eq!(merged.decisions.len(), 1);
        assert_eq!(merged.decisions[0].summary, "Use PostgreSQL for the database");
    }

    #[test]
    fn test_distinct_decisions_both_survive() {
        let merged = merge_results(vec![
            result_with_decisions(&["Use PostgreSQL"]),
            result_with_decisions(&["Use MongoDB"]),
        ]);

        assert_eq!(merged.decisions.len(), 2);
    }

    #[test]
    fn test_duplicate_checked_against_all_kept_items() {
        // The third summary duplicates the first, not the second.
        let merged = merge_results(vec![result_with_decisions(&[
            "Use PostgreSQL for the database",
            "Ship the beta in March",
            "Use PostgreSQL for database",
        ])]);

        assert_eq!(merged.decisions.len(), 2);
    }

    #[test]
    fn test_action_item_restating_decision_is_dropped() {
        let merged = merge_results(vec![ExtractionResult {
            decisions: vec![decision("Use PostgreSQL for the database")],
            action_items: vec![
                action("Set up PostgreSQL database"),
                action("Write the onboarding guide"),
            ],
            ..Default::default()
        }]);

        assert_eq!(merged.action_items.len(), 1);
        assert_eq!(merged.action_items[0].description, "Write the onboarding guide");
    }

    #[test]
    fn test_idea_restating_decision_is_dropped() {
        let merged = merge_results(vec![ExtractionResult {
            decisions: vec![decision("Use PostgreSQL for the database")],
            ideas: vec![Idea {
                title: "use postgresql for the database".to_string(),
                description: String::new(),
                category: "suggestion".to_string(),
            }],
            ..Default::default()
        }]);

        assert!(merged.ideas.is_empty());
    }

    #[test]
    fn test_question_not_checked_against_decisions() {
        let merged = merge_results(vec![ExtractionResult {
            decisions: vec![decision("Use PostgreSQL for the database")],
            questions: vec![minutes_domain::Question {
                text: "Use PostgreSQL for the database".to_string(),
                context: String::new(),
                owner: String::new(),
            }],
            ..Default::default()
        }]);

        // The asymmetry is deliberate: only actions and ideas are checked.
        assert_eq!(merged.questions.len(), 1);
    }

    #[test]
    fn test_concepts_dedupe_exact_only() {
        let merged = merge_results(vec![ExtractionResult {
            concepts: vec![
                Concept {
                    name: "Event sourcing".to_string(),
                    definition: "first".to_string(),
                },
                Concept {
                    name: "Event sourcing".to_string(),
                    definition: "second".to_string(),
                },
                Concept {
                    name: "Event Sourcing".to_string(),
                    definition: "different case".to_string(),
                },
            ],
            ..Default::default()
        }]);

        assert_eq!(merged.concepts.len(), 2);
        assert_eq!(merged.concepts[0].definition, "first");
    }

    #[test]
    fn test_terms_dedupe_exact_keep_first() {
        let merged = merge_results(vec![ExtractionResult {
            terms: vec![
                Term {
                    term: "gRPC".to_string(),
                    definition: "first".to_string(),
                    context: String::new(),
                },
                Term {
                    term: "gRPC".to_string(),
                    definition: "second".to_string(),
                    context: String::new(),
                },
            ],
            ..Default::default()
        }]);

        assert_eq!(merged.terms.len(), 1);
        assert_eq!(merged.terms[0].definition, "first");
    }

    #[test]
    fn test_longest_tldr_wins() {
        let merged = merge_results(vec![
            ExtractionResult {
                tldr: "Short.".to_string(),
                ..Default::default()
            },
            ExtractionResult {
                tldr: "A considerably longer summary of the session.".to_string(),
                ..Default::default()
            },
            ExtractionResult::default(),
        ]);

        assert_eq!(merged.tldr, "A considerably longer summary of the session.");
    }

    #[test]
    fn test_all_empty_tldrs_stay_empty() {
        let merged = merge_results(vec![ExtractionResult::default(), ExtractionResult::default()]);
        assert_eq!(merged.tldr, "");
    }

    #[test]
    fn test_chunk_order_preserved() {
        let merged = merge_results(vec![
            result_with_decisions(&["Alpha release in June"]),
            result_with_decisions(&["Hire two backend engineers"]),
        ]);

        assert_eq!(merged.decisions[0].summary, "Alpha release in June");
        assert_eq!(merged.decisions[1].summary, "Hire two backend engineers");
    }
}
