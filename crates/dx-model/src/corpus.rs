use crate::error::{ModelError, Result};

/// Parallel id and text columns extracted from a tabular source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    ids: Vec<String>,
    texts: Vec<String>,
}

impl Corpus {
    /// Pairs the two columns; they must have the same length.
    pub fn new(ids: Vec<String>, texts: Vec<String>) -> Result<Self> {
        if ids.len() != texts.len() {
            return Err(ModelError::LengthMismatch {
                ids: ids.len(),
                texts: texts.len(),
            });
        }
        Ok(Self { ids, texts })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
