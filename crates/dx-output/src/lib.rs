//! Persisting and post-processing match records.

pub mod clean;
pub mod error;
pub mod format;
pub mod sink;

pub use clean::{OUTPUT_FILE_NAMES, clean_outputs};
pub use error::OutputError;
pub use format::{CSV_HEADER, JsonLines, OutputFormat, convert, default_output_path, read_jsonl};
pub use sink::{DEFAULT_OUTPUT_FILE, JsonLinesSink};
