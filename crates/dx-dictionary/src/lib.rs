#![deny(unsafe_code)]

pub mod error;
pub mod loader;

pub use crate::error::DictionaryError;
pub use crate::loader::{
    DICTIONARY_ENV_VAR, DictionaryOrigin, LoadedDictionary, SourceFormat, load_bundled_dictionary,
    load_default_dictionary, load_dictionary, parse_dictionary,
};
