//! Corpus ingestion from delimited files.

pub mod corpus;
pub mod error;

pub use corpus::{find_column, read_corpus, read_corpus_from_reader};
pub use error::IngestError;
