//! Text similarity for deduplication
//!
//! A normalized ratio in [0, 1] based on repeated longest-matching-block
//! decomposition: find the longest common block, recurse on the pieces to
//! the left and right, and sum the matched characters. The sum is
//! normalized by the shorter string, so a short restatement contained in a
//! longer one ("Use gRPC" vs "Use gRPC for APIs") scores 1.0 rather than
//! being diluted by the extra length.

use std::collections::HashMap;

/// Normalized similarity between two strings.
///
/// `matched_chars / min(len_a, len_b)`; two empty strings are identical
/// (1.0), one empty string matches nothing (0.0). Comparison is per `char`.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return if a.len() == b.len() { 1.0 } else { 0.0 };
    }

    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }

    let mut matches = 0usize;
    let mut pending = vec![(0usize, a.len(), 0usize, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(&a, &b2j, alo, ahi, blo, bhi);
        if size > 0 {
            matches += size;
            pending.push((alo, i, blo, j));
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matches as f64 / a.len().min(b.len()) as f64
}

/// Longest block `a[i..i+size] == b[j..j+size]` within the given windows.
///
/// `j2len[j]` holds the length of the match ending at `a[i-1]`/`b[j]`;
/// extending it by the current character gives the match ending at
/// `a[i]`/`b[j]` in amortized constant time per occurrence.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0usize;

    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, &ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let size = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                new_j2len.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        j2len = new_j2len;
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(similarity_ratio("abc", "abc"), 1.0);
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn test_one_empty() {
        assert_eq!(similarity_ratio("abc", ""), 0.0);
        assert_eq!(similarity_ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_disjoint_strings() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_known_ratio() {
        // "abcd" vs "bcde": common block "bcd", 3 of 4 chars.
        let ratio = similarity_ratio("abcd", "bcde");
        assert!((ratio - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_contained_string_scores_full() {
        assert_eq!(similarity_ratio("Use gRPC", "Use gRPC for APIs"), 1.0);
        assert_eq!(similarity_ratio("Use gRPC for APIs", "Use gRPC"), 1.0);
    }

    #[test]
    fn test_near_duplicate_summaries_cross_threshold() {
        let ratio = similarity_ratio(
            "Use PostgreSQL for the database",
            "Use PostgreSQL for database",
        );
        assert!(ratio >= 0.8, "ratio was {}", ratio);
    }

    #[test]
    fn test_distinct_summaries_stay_below_threshold() {
        let ratio = similarity_ratio("Use PostgreSQL", "Use MongoDB");
        assert!(ratio < 0.8, "ratio was {}", ratio);
    }

    #[test]
    fn test_restated_decision_crosses_threshold() {
        let ratio = similarity_ratio(
            "set up postgresql database",
            "use postgresql for the database",
        );
        assert!(ratio >= 0.8, "ratio was {}", ratio);
    }

    #[test]
    fn test_symmetric() {
        let a = "Set up PostgreSQL database";
        let b = "Use PostgreSQL for the database";
        assert_eq!(similarity_ratio(a, b), similarity_ratio(b, a));
    }

    #[test]
    fn test_repeated_characters() {
        assert_eq!(similarity_ratio("aaaa", "aa"), 1.0);
    }

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(similarity_ratio("café au lait", "café au lait"), 1.0);
    }
}
