//! String similarity strategies.
//!
//! Every strategy maps a pair of strings to a score in `[0, 1]` where `1.0`
//! means identical. The matcher only relies on that contract, so strategies
//! are interchangeable through [`SimilarityMetric`].
//!
//! Two empty strings are identical and score `1.0`.

use rapidfuzz::distance::{damerau_levenshtein, jaro_winkler, levenshtein};

use dx_model::SimilarityMetric;

/// A normalized string similarity function.
pub trait Similarity: Send + Sync {
    /// Metric implemented by this strategy.
    fn metric(&self) -> SimilarityMetric;

    /// Similarity of `a` and `b`, in `[0, 1]`.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Jaro-Winkler similarity (prefix-weighted, suited to typos in long words).
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

/// Levenshtein distance normalized by the longer string:
/// `1 - distance / max(len(a), len(b))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

/// Damerau-Levenshtein distance (adjacent transpositions cost one edit),
/// normalized like [`Levenshtein`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DamerauLevenshtein;

impl Similarity for JaroWinkler {
    fn metric(&self) -> SimilarityMetric {
        SimilarityMetric::JaroWinkler
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        clamp_unit(jaro_winkler::similarity(a.chars(), b.chars()))
    }
}

impl Similarity for Levenshtein {
    fn metric(&self) -> SimilarityMetric {
        SimilarityMetric::Levenshtein
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        clamp_unit(levenshtein::normalized_similarity(a.chars(), b.chars()))
    }
}

impl Similarity for DamerauLevenshtein {
    fn metric(&self) -> SimilarityMetric {
        SimilarityMetric::DamerauLevenshtein
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        clamp_unit(damerau_levenshtein::normalized_similarity(
            a.chars(),
            b.chars(),
        ))
    }
}

/// Returns the strategy for a configured metric.
pub fn similarity_for(metric: SimilarityMetric) -> Box<dyn Similarity> {
    match metric {
        SimilarityMetric::JaroWinkler => Box::new(JaroWinkler),
        SimilarityMetric::Levenshtein => Box::new(Levenshtein),
        SimilarityMetric::DamerauLevenshtein => Box::new(DamerauLevenshtein),
    }
}

fn clamp_unit(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}
