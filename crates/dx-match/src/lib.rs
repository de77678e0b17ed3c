//! Fuzzy matching of free text against dictionary entries.

pub mod matcher;
pub mod similarity;

pub use matcher::Matcher;
pub use similarity::{DamerauLevenshtein, JaroWinkler, Levenshtein, Similarity, similarity_for};
