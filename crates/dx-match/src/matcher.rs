//! Match decision for one (text, dictionary entry) pair.

use std::borrow::Cow;
use std::fmt;

use dx_model::{DictionaryEntry, MatchMode, MatchOutcome, MatchPolicy, ScanConfig, SearchTerm};

use crate::similarity::{Similarity, similarity_for};

/// Decides whether a text mentions a dictionary entry.
///
/// Tokens are visited left to right; for each token start, the entry's search
/// terms are tried in dictionary order. A search term of `k` words is compared
/// against the `k` tokens starting at that position, joined by single spaces.
pub struct Matcher {
    mode: MatchMode,
    threshold: f64,
    policy: MatchPolicy,
    similarity: Box<dyn Similarity>,
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("mode", &self.mode)
            .field("threshold", &self.threshold)
            .field("policy", &self.policy)
            .field("metric", &self.similarity.metric())
            .finish()
    }
}

impl Matcher {
    pub fn new(config: &ScanConfig) -> Self {
        Self::with_similarity(config, similarity_for(config.metric))
    }

    /// Builds a matcher around a caller-supplied similarity strategy.
    pub fn with_similarity(config: &ScanConfig, similarity: Box<dyn Similarity>) -> Self {
        Self {
            mode: config.mode,
            threshold: config.threshold,
            policy: config.policy,
            similarity,
        }
    }

    /// Matches raw text; the text is normalized first.
    pub fn find(&self, entry: &DictionaryEntry, text: &str) -> Option<MatchOutcome> {
        let normalized = dx_model::text::normalize(text);
        let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
        self.find_in_tokens(entry, &tokens)
    }

    /// Matches pre-normalized tokens.
    ///
    /// Callers scanning one text against many entries should tokenize once and
    /// call this for every entry.
    pub fn find_in_tokens(&self, entry: &DictionaryEntry, tokens: &[&str]) -> Option<MatchOutcome> {
        let mut best: Option<MatchOutcome> = None;
        for start in 0..tokens.len() {
            for term in entry.search_terms() {
                let Some(window) = window_at(tokens, start, term.words) else {
                    continue;
                };
                let score = self.score(&term.text, &window);
                if !self.accepts(score) {
                    continue;
                }
                match self.policy {
                    MatchPolicy::FirstMatch => return Some(outcome(window, score, term)),
                    MatchPolicy::BestScore => {
                        if best.as_ref().is_none_or(|b| score > b.similarity_ratio) {
                            best = Some(outcome(window, score, term));
                        }
                        // nothing can beat a perfect score
                        if score >= 1.0 {
                            return best;
                        }
                    }
                }
            }
        }
        best
    }

    fn score(&self, term: &str, window: &str) -> f64 {
        if term == window {
            return 1.0;
        }
        match self.mode {
            MatchMode::Strict => 0.0,
            MatchMode::Lenient => self.similarity.similarity(term, window),
        }
    }

    fn accepts(&self, score: f64) -> bool {
        match self.mode {
            MatchMode::Strict => score >= 1.0,
            MatchMode::Lenient => score >= self.threshold,
        }
    }
}

fn window_at<'t>(tokens: &[&'t str], start: usize, words: usize) -> Option<Cow<'t, str>> {
    let end = start.checked_add(words)?;
    let slice = tokens.get(start..end)?;
    match slice {
        [] => None,
        [single] => Some(Cow::Borrowed(*single)),
        many => Some(Cow::Owned(many.join(" "))),
    }
}

fn outcome(window: Cow<'_, str>, score: f64, term: &SearchTerm) -> MatchOutcome {
    MatchOutcome {
        word_found: window.into_owned(),
        similarity_ratio: score,
        matched_term: term.text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, synonyms: &[&str]) -> DictionaryEntry {
        DictionaryEntry::new(name, synonyms.iter().copied(), ["tag"]).expect("valid entry")
    }

    #[test]
    fn windows_respect_bounds() {
        let tokens = ["ethyl", "alcohol", "level"];
        assert_eq!(window_at(&tokens, 0, 1).as_deref(), Some("ethyl"));
        assert_eq!(window_at(&tokens, 1, 2).as_deref(), Some("alcohol level"));
        assert_eq!(window_at(&tokens, 2, 2), None);
        assert_eq!(window_at(&tokens, 0, 0), None);
    }

    #[test]
    fn strict_never_calls_similarity() {
        struct Panics;
        impl Similarity for Panics {
            fn metric(&self) -> dx_model::SimilarityMetric {
                dx_model::SimilarityMetric::JaroWinkler
            }
            fn similarity(&self, _: &str, _: &str) -> f64 {
                panic!("strict mode must compare by equality");
            }
        }
        let matcher = Matcher::with_similarity(&ScanConfig::strict(), Box::new(Panics));
        let heroin = entry("Heroin", &["heroin"]);
        assert!(matcher.find(&heroin, "heroine use").is_none());
        assert!(matcher.find(&heroin, "heroin use").is_some());
    }

    #[test]
    fn debug_names_metric() {
        let matcher = Matcher::new(&ScanConfig::default());
        assert!(format!("{matcher:?}").contains("JaroWinkler"));
    }
}
