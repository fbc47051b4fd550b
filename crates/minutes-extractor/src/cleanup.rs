//! Post-extraction cleanup
//!
//! Models attribute owners to roles instead of people, pad empty fields
//! with filler, and occasionally invent rationale or dates. Cleanup
//! normalizes owners, strips filler phrases, and blanks free-text and date
//! fields that are not grounded in the source transcript.

use minutes_domain::ExtractionResult;
use once_cell::sync::Lazy;
use regex::Regex;

/// Owners that survive normalization: empty, the conversation roles, or a
/// Title-Case proper name.
static VALID_OWNER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^$|^user$|^assistant$|^[A-Z][a-z]+(\s[A-Z][a-z]+)*$").unwrap()
});

/// Role and organization nouns; an "owner" containing one is not a person.
static BAD_OWNER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(team|lead|committee|panel|board|management|department|division|manager|developer|engineer|architect|analyst|reviewer|group)\b",
    )
    .unwrap()
});

/// Filler phrases that carry no information. Anchored patterns must match
/// from the start of the trimmed value; the rest match anywhere.
static FILLER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^no (particular|specific|explicit|clear|stated|given|documented)\b",
        r"(?i)^not (specified|mentioned|stated|discussed|provided|given|documented)\b",
        r"(?i)^none (provided|given|stated|mentioned|specified)\b",
        r"(?i)^straightforward\b",
        r"(?i)^n/?a$",
        r"(?i)^(no|none|n/?a|tbd|unknown|unspecified)$",
        r"(?i)^implicit\b",
        r"(?i)^(just|simply)\s+(a\s+)?(decision|choice|standard)\b",
        r"(?i)no debate",
        r"(?i)no (particular |specific )?reason(ing)?\b",
        r"(?i)^it'?s (just )?(what|how) we",
        r"(?i)^(standard|default|common|obvious) (choice|decision|approach)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Words that count toward groundedness: four letters or longer.
static GROUNDING_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w{4,}\b").unwrap());

/// Minimum fraction of a field's qualifying words that must appear in the
/// transcript for the field to be kept.
const GROUNDING_THRESHOLD: f64 = 0.6;

/// Normalize owners, strip filler, and blank ungrounded detail.
///
/// Grounding checks (rationale/context wording, dates and deadlines) only
/// run when a transcript is supplied; filler stripping and owner
/// normalization always run. Fields are kept whole or blanked, never
/// partially redacted.
pub fn cleanup_result(mut result: ExtractionResult, transcript: &str) -> ExtractionResult {
    let transcript_lower = transcript.to_lowercase();

    for d in &mut result.decisions {
        d.owner = clean_owner(&d.owner);
        d.rationale = clean_filler(&d.rationale);
        if !transcript.is_empty() {
            d.rationale = clean_ungrounded(&d.rationale, &transcript_lower);
            d.date = clean_date(&d.date, transcript);
        }
    }

    for q in &mut result.questions {
        q.owner = clean_owner(&q.owner);
        q.context = clean_filler(&q.context);
        if !transcript.is_empty() {
            q.context = clean_ungrounded(&q.context, &transcript_lower);
        }
    }

    for a in &mut result.action_items {
        a.owner = clean_owner(&a.owner);
        if !transcript.is_empty() {
            a.deadline = clean_date(&a.deadline, transcript);
        }
    }

    result
}

fn clean_owner(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if VALID_OWNER_RE.is_match(value) {
        return value.to_string();
    }
    if BAD_OWNER_RE.is_match(value) {
        return String::new();
    }
    if value == value.to_lowercase() {
        return String::new();
    }
    value.to_string()
}

fn clean_filler(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let trimmed = value.trim();
    for pattern in FILLER_PATTERNS.iter() {
        if pattern.is_match(trimmed) {
            return String::new();
        }
    }
    value.to_string()
}

fn clean_ungrounded(value: &str, transcript_lower: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let words: std::collections::HashSet<String> = GROUNDING_WORD_RE
        .find_iter(value)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    if words.is_empty() {
        return value.to_string();
    }
    let grounded = words
        .iter()
        .filter(|w| transcript_lower.contains(w.as_str()))
        .count();
    if (grounded as f64) / (words.len() as f64) < GROUNDING_THRESHOLD {
        return String::new();
    }
    value.to_string()
}

fn clean_date(value: &str, transcript: &str) -> String {
    if value.is_empty() || !transcript.contains(value) {
        return String::new();
    }
    value.to_string()
}
