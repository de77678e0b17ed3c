//! Configuration options for a scan.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Similarity a lenient match must reach when no threshold is configured.
pub const DEFAULT_LENIENT_THRESHOLD: f64 = 0.90;

/// Records scanned per chunk by the streaming scan.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Mode for deciding whether a token matches a search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Accept any similarity at or above the configured threshold.
    #[default]
    Lenient,
    /// Require exact equality after normalization.
    Strict,
}

/// String similarity algorithm used by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityMetric {
    #[default]
    JaroWinkler,
    Levenshtein,
    DamerauLevenshtein,
}

impl SimilarityMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JaroWinkler => "jaro-winkler",
            Self::Levenshtein => "levenshtein",
            Self::DamerauLevenshtein => "damerau-levenshtein",
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which qualifying (token, search term) pair is reported for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// First qualifying pair in token-then-synonym order.
    #[default]
    FirstMatch,
    /// Highest scoring pair; the earliest one wins ties.
    BestScore,
}

/// Options for one scan run.
///
/// Passed explicitly to the matcher and scanner; nothing reads process-wide
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub mode: MatchMode,
    /// Minimum similarity for a lenient match, in `(0, 1]`.
    pub threshold: f64,
    pub metric: SimilarityMetric,
    pub policy: MatchPolicy,
    /// Worker threads; `1` scans on the calling thread.
    pub jobs: usize,
    /// Records per streaming chunk.
    pub chunk_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::Lenient,
            threshold: DEFAULT_LENIENT_THRESHOLD,
            metric: SimilarityMetric::default(),
            policy: MatchPolicy::default(),
            jobs: 1,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ScanConfig {
    /// Exact matching only.
    pub fn strict() -> Self {
        Self {
            mode: MatchMode::Strict,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(ModelError::InvalidOption {
                message: format!("threshold must be in (0, 1], got {}", self.threshold),
            });
        }
        if self.jobs == 0 {
            return Err(ModelError::InvalidOption {
                message: "jobs must be at least 1".to_string(),
            });
        }
        if self.chunk_size == 0 {
            return Err(ModelError::InvalidOption {
                message: "chunk_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Whether a similarity score qualifies as a match under this config.
    pub fn accepts(&self, similarity: f64) -> bool {
        match self.mode {
            MatchMode::Strict => similarity >= 1.0,
            MatchMode::Lenient => similarity >= self.threshold,
        }
    }
}
