//! Keyword relevance scoring
//!
//! A heuristic relevance proxy, not a probability: each keyword
//! contributes `1 - 0.5^c` for `c` whole-word occurrences, rewarding
//! repetition with diminishing returns, and the sum is normalized by the
//! keyword count and capped at 1.0.

use crate::model::DocumentSnippet;
use regex_lite::Regex;
use std::cmp::Ordering;

/// Bounded keyword relevance scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceScorer;

impl RelevanceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score `content` against `keywords`, returning a value in [0, 1].
    ///
    /// Occurrences are counted as case-insensitive whole words, so
    /// "segment" does not match inside "segments". An empty keyword list
    /// scores 0.
    pub fn score<S: AsRef<str>>(&self, content: &str, keywords: &[S]) -> f32 {
        if keywords.is_empty() {
            return 0.0;
        }

        let mut sum = 0.0f32;
        for keyword in keywords {
            let count = count_whole_word(content, keyword.as_ref());
            sum += 1.0 - 0.5f32.powi(count as i32);
        }

        (sum / keywords.len() as f32).min(1.0)
    }
}

/// Count case-insensitive whole-word occurrences of `keyword` in `content`
fn count_whole_word(content: &str, keyword: &str) -> usize {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return 0;
    }

    let pattern = format!(r"(?i)\b{}\b", regex_lite::escape(keyword));
    match Regex::new(&pattern) {
        Ok(re) => re.find_iter(content).count(),
        Err(_) => 0,
    }
}

/// Stable descending sort by relevance; ties retain prior relative order
pub fn sort_by_relevance(snippets: &mut [DocumentSnippet]) {
    snippets.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_keywords_score_zero() {
        let scorer = RelevanceScorer::new();
        let keywords: Vec<String> = vec![];
        assert_eq!(scorer.score("any content at all", &keywords), 0.0);
    }

    #[test]
    fn test_score_bounds() {
        let scorer = RelevanceScorer::new();
        let content = "sources sources sources identity identity audiences";
        let score = scorer.score(content, &["sources", "identity", "audiences"]);
        assert!((0.0..=1.0).contains(&score));

        // Every keyword absent
        assert_eq!(scorer.score("nothing relevant here", &["sources"]), 0.0);
    }

    #[test]
    fn test_single_occurrence_contribution() {
        let scorer = RelevanceScorer::new();
        // One keyword appearing once: 1 - 0.5^1 = 0.5
        let score = scorer.score("configure a source today", &["source"]);
        assert!((score - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_repetition_has_diminishing_returns() {
        let scorer = RelevanceScorer::new();
        let once = scorer.score("source", &["source"]);
        let twice = scorer.score("source source", &["source"]);
        let thrice = scorer.score("source source source", &["source"]);
        assert!(twice > once);
        assert!(thrice > twice);
        assert!(thrice - twice < twice - once);
    }

    #[test]
    fn test_monotonic_in_occurrences() {
        let scorer = RelevanceScorer::new();
        let keywords = ["identity", "profiles"];
        let base = "identity rules and profiles";
        let more = "identity rules and profiles with identity";
        assert!(scorer.score(more, &keywords) >= scorer.score(base, &keywords));
    }

    #[test]
    fn test_whole_word_matching() {
        let scorer = RelevanceScorer::new();
        // "segments" must not count as an occurrence of "segment"
        assert_eq!(scorer.score("audience segments", &["segment"]), 0.0);
        assert!(scorer.score("audience segment", &["segment"]) > 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        let scorer = RelevanceScorer::new();
        let lower = scorer.score("configure the source", &["Source"]);
        let upper = scorer.score("configure the SOURCE", &["source"]);
        assert_eq!(lower, upper);
        assert!(lower > 0.0);
    }

    #[test]
    fn test_sort_is_stable_descending() {
        use crate::model::DocumentSnippet;

        let mut snippets = vec![
            DocumentSnippet::new("first of the ties", "u1", 0.4),
            DocumentSnippet::new("top", "u2", 0.9),
            DocumentSnippet::new("second of the ties", "u3", 0.4),
        ];
        sort_by_relevance(&mut snippets);

        let contents: Vec<_> = snippets.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["top", "first of the ties", "second of the ties"]);
    }
}
