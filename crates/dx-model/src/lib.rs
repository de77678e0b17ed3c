#![deny(unsafe_code)]

pub mod corpus;
pub mod dictionary;
pub mod error;
pub mod options;
pub mod record;
pub mod sink;
pub mod text;

pub use corpus::Corpus;
pub use dictionary::{Dictionary, DictionaryEntry, SearchTerm};
pub use error::{ModelError, Result};
pub use options::{
    DEFAULT_CHUNK_SIZE, DEFAULT_LENIENT_THRESHOLD, MatchMode, MatchPolicy, ScanConfig,
    SimilarityMetric,
};
pub use record::{MatchOutcome, MatchRecord, ScanHit};
pub use sink::{MemorySink, ResultSink};
