//! The fixed set of knowledge categories
//!
//! Categories carry configuration, not behavior: the wire tag used in
//! output documents and memory tags, and the fixed importance weight
//! attached to memories. Consumers dispatch on the enum instead of
//! repeating string comparisons.

/// A knowledge category produced by extraction.
///
/// Variant order here is the order categories are pushed to the memory
/// service, most important first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A decision that was made
    Decision,
    /// Follow-up work
    ActionItem,
    /// A key concept
    Concept,
    /// A technical term or abbreviation
    Term,
    /// An idea or suggestion
    Idea,
    /// An open question
    Question,
}

impl Category {
    /// All categories, in memory-pipe order.
    pub const ALL: [Category; 6] = [
        Category::Decision,
        Category::ActionItem,
        Category::Concept,
        Category::Term,
        Category::Idea,
        Category::Question,
    ];

    /// The snake_case tag used in tags and metadata.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Decision => "decision",
            Category::ActionItem => "action_item",
            Category::Concept => "concept",
            Category::Term => "term",
            Category::Idea => "idea",
            Category::Question => "question",
        }
    }

    /// Fixed importance weight attached to memories of this category.
    pub fn importance(self) -> f64 {
        match self {
            Category::Decision => 0.85,
            Category::ActionItem => 0.80,
            Category::Concept => 0.65,
            Category::Term => 0.60,
            Category::Idea => 0.50,
            Category::Question => 0.40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_unique() {
        let mut tags: Vec<&str> = Category::ALL.iter().map(|c| c.tag()).collect();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), 6);
    }

    #[test]
    fn test_importance_ordering_matches_pipe_order() {
        let weights: Vec<f64> = Category::ALL.iter().map(|c| c.importance()).collect();
        for pair in weights.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_decision_importance() {
        assert_eq!(Category::Decision.importance(), 0.85);
        assert_eq!(Category::Question.importance(), 0.40);
    }
}
