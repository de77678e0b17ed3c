//! Scan orchestration: runs the matcher over every (record, entry) pair and
//! turns positional hits into persisted match records.

pub mod error;
pub mod progress;
pub mod reconcile;
pub mod scan;

pub use error::ScanError;
pub use progress::{NoProgress, ProgressCounter, ScanProgress};
pub use reconcile::{resolve, resolve_hit};
pub use scan::{ScanSummary, Scanner};
