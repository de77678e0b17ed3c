//! Match results.
//!
//! A scan produces [`ScanHit`] values that still point at their source row by
//! position. Only after the row position is resolved against the caller's id
//! column does a hit become a [`MatchRecord`], the sole persisted form.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Outcome of matching one text against one dictionary entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Text window from the record that qualified.
    pub word_found: String,
    /// Similarity between `word_found` and `matched_term`, in `[0, 1]`.
    pub similarity_ratio: f64,
    /// Normalized search term that produced the match.
    pub matched_term: String,
}

/// A match whose record id has not been resolved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanHit {
    /// 0-based position of the source record in the scanned corpus.
    pub row_index: usize,
    pub drug_name: String,
    pub similarity_ratio: f64,
    pub word_found: String,
    pub tags: BTreeSet<String>,
}

impl ScanHit {
    /// Attaches the external record id, consuming the positional index.
    pub fn into_record(self, record_id: impl Into<String>) -> MatchRecord {
        MatchRecord {
            record_id: record_id.into(),
            drug_name: self.drug_name,
            similarity_ratio: self.similarity_ratio,
            word_found: self.word_found,
            tags: self.tags,
        }
    }
}

/// One persisted match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub record_id: String,
    pub drug_name: String,
    pub similarity_ratio: f64,
    pub word_found: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}
