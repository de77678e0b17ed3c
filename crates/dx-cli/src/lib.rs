//! Library side of the `drug-extraction` command line.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod progress;
