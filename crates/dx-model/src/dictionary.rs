//! Controlled drug vocabulary.
//!
//! A [`Dictionary`] is an ordered list of [`DictionaryEntry`] values. Each entry
//! carries a display name, the synonyms searched for in free text, and a set
//! of descriptive tags copied onto every match.
//!
//! Search terms are normalized once when the entry is built, so the matcher
//! never re-normalizes dictionary text while scanning:
//!
//! ```text
//! Entry:   name="Heroin", synonyms=["Heroin", "Diacetyl-morphine"]
//! Terms:   "heroin" (1 word), "diacetylmorphine" (1 word)
//! ```
//!
//! An entry without synonyms is searched by its name.

use std::collections::{BTreeSet, HashSet};

use crate::error::{ModelError, Result};
use crate::text::{normalize, word_count};

/// A normalized search term with its token count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    /// Normalized text.
    pub text: String,
    /// Number of whitespace separated tokens in `text`.
    pub words: usize,
}

impl SearchTerm {
    fn from_raw(raw: &str) -> Option<Self> {
        let text = normalize(raw);
        let words = word_count(&text);
        (words > 0).then_some(Self { text, words })
    }
}

/// One drug in the vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    name: String,
    synonyms: Vec<String>,
    tags: BTreeSet<String>,
    search_terms: Vec<SearchTerm>,
}

impl DictionaryEntry {
    /// Builds an entry, normalizing its search terms.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] for a blank name and
    /// [`ModelError::EmptySearchTerm`] when a synonym normalizes to nothing.
    pub fn new<N, S, T>(name: N, synonyms: S, tags: T) -> Result<Self>
    where
        N: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        let synonyms: Vec<String> = synonyms.into_iter().map(Into::into).collect();
        let tags: BTreeSet<String> = tags
            .into_iter()
            .map(Into::into)
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        let mut search_terms = Vec::with_capacity(synonyms.len().max(1));
        for (index, synonym) in synonyms.iter().enumerate() {
            let term = SearchTerm::from_raw(synonym).ok_or_else(|| ModelError::EmptySearchTerm {
                entry: name.clone(),
                index,
            })?;
            // Synonyms that only differ by case or punctuation collapse to one term.
            if !search_terms.contains(&term) {
                search_terms.push(term);
            }
        }
        if search_terms.is_empty() {
            let term = SearchTerm::from_raw(&name)
                .ok_or(ModelError::EmptySearchTerm { entry: name.clone(), index: 0 })?;
            search_terms.push(term);
        }

        Ok(Self {
            name,
            synonyms,
            tags,
            search_terms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Synonyms exactly as configured.
    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Normalized search terms in synonym order.
    pub fn search_terms(&self) -> &[SearchTerm] {
        &self.search_terms
    }
}

/// Ordered, immutable drug vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
}

impl Dictionary {
    /// Builds a dictionary, rejecting duplicate names (case-insensitive).
    pub fn new(entries: Vec<DictionaryEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(fold_name(&entry.name)) {
                return Err(ModelError::DuplicateEntry {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by name, folding case the same way duplicates are detected.
    pub fn get(&self, name: &str) -> Option<&DictionaryEntry> {
        let key = fold_name(name);
        self.entries
            .iter()
            .find(|entry| fold_name(&entry.name) == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryEntry> {
        self.entries.iter()
    }
}

fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a DictionaryEntry;
    type IntoIter = std::slice::Iter<'a, DictionaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
