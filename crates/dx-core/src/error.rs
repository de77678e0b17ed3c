use std::io;

use dx_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to write match for record {record_id}")]
    Sink {
        record_id: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to start {jobs} scan workers")]
    ThreadPool {
        jobs: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}
