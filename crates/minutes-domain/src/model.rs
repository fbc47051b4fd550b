//! The extraction data model
//!
//! Every item type has one identifying field that is required and must be
//! non-empty once the item is accepted into a result; all other fields
//! default to the empty string. Unknown fields are rejected during
//! deserialization so that a model response drifting from the schema fails
//! the attempt instead of being silently truncated.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A decision made during the meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Decision {
    /// What was decided
    pub summary: String,

    /// Who made it
    #[serde(default)]
    pub owner: String,

    /// Why this choice
    #[serde(default)]
    pub rationale: String,

    /// When
    #[serde(default)]
    pub date: String,
}

/// An idea or suggestion discussed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Idea {
    /// Short idea name
    pub title: String,

    /// What it is
    #[serde(default)]
    pub description: String,

    /// problem|opportunity|suggestion - free-form, not an enum
    #[serde(default = "default_idea_category")]
    pub category: String,
}

fn default_idea_category() -> String {
    "suggestion".to_string()
}

/// An open question or topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Question {
    /// The question
    pub text: String,

    /// Why it matters
    #[serde(default)]
    pub context: String,

    /// Who answers
    #[serde(default)]
    pub owner: String,
}

/// Something to do after the meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ActionItem {
    /// What to do
    pub description: String,

    /// Who owns it
    #[serde(default)]
    pub owner: String,

    /// When it is due
    #[serde(default)]
    pub deadline: String,
}

/// A key concept discussed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Concept {
    /// Concept name
    pub name: String,

    /// What it is
    #[serde(default)]
    pub definition: String,
}

/// A technical term or abbreviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Term {
    /// The word or abbreviation
    pub term: String,

    /// What it means
    #[serde(default)]
    pub definition: String,

    /// Where mentioned
    #[serde(default)]
    pub context: String,
}

/// The complete result of knowledge extraction from a transcript.
///
/// Insertion order within each list is preserved and meaningful: merging
/// keeps the first occurrence of near-duplicate items. Results are value
/// objects; chunk results share no state until they are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExtractionResult {
    /// Decisions made
    #[serde(default)]
    pub decisions: Vec<Decision>,

    /// Ideas and suggestions
    #[serde(default)]
    pub ideas: Vec<Idea>,

    /// Open questions
    #[serde(default)]
    pub questions: Vec<Question>,

    /// Follow-up work
    #[serde(default)]
    pub action_items: Vec<ActionItem>,

    /// Key concepts
    #[serde(default)]
    pub concepts: Vec<Concept>,

    /// Terminology
    #[serde(default)]
    pub terms: Vec<Term>,

    /// 2-3 sentence summary
    #[serde(default)]
    pub tldr: String,
}

impl ExtractionResult {
    /// Validate that every item carries a non-empty identifying field.
    ///
    /// A violation means the model response does not satisfy the schema
    /// contract; the caller treats it like any other malformed response.
    pub fn validate(&self) -> Result<(), String> {
        for (i, d) in self.decisions.iter().enumerate() {
            if d.summary.is_empty() {
                return Err(format!("decision {i} has an empty summary"));
            }
        }
        for (i, idea) in self.ideas.iter().enumerate() {
            if idea.title.is_empty() {
                return Err(format!("idea {i} has an empty title"));
            }
        }
        for (i, q) in self.questions.iter().enumerate() {
            if q.text.is_empty() {
                return Err(format!("question {i} has empty text"));
            }
        }
        for (i, a) in self.action_items.iter().enumerate() {
            if a.description.is_empty() {
                return Err(format!("action item {i} has an empty description"));
            }
        }
        for (i, c) in self.concepts.iter().enumerate() {
            if c.name.is_empty() {
                return Err(format!("concept {i} has an empty name"));
            }
        }
        for (i, t) in self.terms.iter().enumerate() {
            if t.term.is_empty() {
                return Err(format!("term entry {i} is empty"));
            }
        }
        Ok(())
    }

    /// True when no category contains any item and the summary is empty.
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
            && self.ideas.is_empty()
            && self.questions.is_empty()
            && self.action_items.is_empty()
            && self.concepts.is_empty()
            && self.terms.is_empty()
            && self.tldr.is_empty()
    }
}
