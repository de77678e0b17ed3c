use std::fmt;
use std::path::{Path, PathBuf};

use dx_model::{Dictionary, DictionaryEntry, ModelError};
use serde::Deserialize;
use sha2::Digest;
use tracing::{debug, info};

use crate::error::DictionaryError;

/// Environment variable naming a dictionary file that replaces the bundled one.
pub const DICTIONARY_ENV_VAR: &str = "DX_DICTIONARY";

const BUNDLED_DICTIONARY: &str = include_str!("../data/drug_info.yaml");

/// Serialized dictionary layout.
///
/// Accepts both the YAML layout (`Drugs`, `Name`, `Search Terms`, `Tags`) and
/// the JSON export layout (`drugs`, `name`, `search_terms`, `tags`).
#[derive(Debug, Deserialize)]
struct DictionaryFile {
    #[serde(alias = "Drugs")]
    drugs: Vec<DrugRecord>,
}

#[derive(Debug, Deserialize)]
struct DrugRecord {
    #[serde(alias = "Name")]
    name: String,
    #[serde(default, alias = "Search Terms")]
    search_terms: Vec<String>,
    #[serde(default, alias = "Tags")]
    tags: Vec<String>,
}

/// Serialization format of a dictionary source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Where a loaded dictionary came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryOrigin {
    Bundled,
    File(PathBuf),
}

impl fmt::Display for DictionaryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => f.write_str("<bundled>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A parsed dictionary with its provenance.
#[derive(Debug, Clone)]
pub struct LoadedDictionary {
    pub dictionary: Dictionary,
    pub origin: DictionaryOrigin,
    /// SHA-256 of the source bytes, for reproducibility reports.
    pub sha256: String,
}

/// Parses dictionary text in the given format.
pub fn parse_dictionary(
    text: &str,
    format: SourceFormat,
    origin: &DictionaryOrigin,
) -> Result<Dictionary, DictionaryError> {
    let file: DictionaryFile = match format {
        SourceFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|source| DictionaryError::Yaml {
                origin: origin.to_string(),
                source,
            })?
        }
        SourceFormat::Json => {
            serde_json::from_str(text).map_err(|source| DictionaryError::Json {
                origin: origin.to_string(),
                source,
            })?
        }
    };
    build_dictionary(file, origin)
}

fn build_dictionary(
    file: DictionaryFile,
    origin: &DictionaryOrigin,
) -> Result<Dictionary, DictionaryError> {
    let invalid = |source: ModelError| DictionaryError::Invalid {
        origin: origin.to_string(),
        source,
    };
    let mut entries = Vec::with_capacity(file.drugs.len());
    for record in file.drugs {
        let entry = DictionaryEntry::new(record.name, record.search_terms, record.tags)
            .map_err(invalid)?;
        debug!(
            drug = entry.name(),
            search_terms = entry.search_terms().len(),
            "dictionary entry"
        );
        entries.push(entry);
    }
    Dictionary::new(entries).map_err(invalid)
}

/// Loads the dictionary compiled into the binary.
pub fn load_bundled_dictionary() -> Result<LoadedDictionary, DictionaryError> {
    let origin = DictionaryOrigin::Bundled;
    let dictionary = parse_dictionary(BUNDLED_DICTIONARY, SourceFormat::Yaml, &origin)?;
    Ok(finish(dictionary, origin, BUNDLED_DICTIONARY.as_bytes()))
}

/// Loads a dictionary file; the format follows the file extension.
pub fn load_dictionary(path: &Path) -> Result<LoadedDictionary, DictionaryError> {
    let format = SourceFormat::from_path(path).ok_or_else(|| DictionaryError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = std::fs::read_to_string(path).map_err(|e| DictionaryError::io(path, e))?;
    let origin = DictionaryOrigin::File(path.to_path_buf());
    let dictionary = parse_dictionary(&text, format, &origin)?;
    Ok(finish(dictionary, origin, text.as_bytes()))
}

/// Loads the dictionary named by `explicit`, else by [`DICTIONARY_ENV_VAR`],
/// else the bundled one.
pub fn load_default_dictionary(explicit: Option<&Path>) -> Result<LoadedDictionary, DictionaryError> {
    if let Some(path) = explicit {
        return load_dictionary(path);
    }
    match std::env::var_os(DICTIONARY_ENV_VAR) {
        Some(path) if !path.is_empty() => load_dictionary(Path::new(&path)),
        _ => load_bundled_dictionary(),
    }
}

fn finish(dictionary: Dictionary, origin: DictionaryOrigin, bytes: &[u8]) -> LoadedDictionary {
    let sha256 = hex::encode(sha2::Sha256::digest(bytes));
    info!(
        origin = %origin,
        entries = dictionary.len(),
        sha256 = %sha256,
        "dictionary loaded"
    );
    LoadedDictionary {
        dictionary,
        origin,
        sha256,
    }
}
