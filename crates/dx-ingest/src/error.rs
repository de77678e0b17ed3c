use std::path::PathBuf;

use dx_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {origin}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("column '{column}' not found; available columns: {}", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("line {line} has no value for column '{column}'")]
    MissingCell { line: u64, column: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}
