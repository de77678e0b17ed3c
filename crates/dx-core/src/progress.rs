//! Scan progress reporting.

use std::sync::atomic::{AtomicU64, Ordering};

/// Receives one notification per completed record.
///
/// Called from scan workers, so implementations must be thread-safe. The
/// reported total only ever grows.
pub trait ScanProgress: Sync {
    fn advance(&self, records: u64);
}

/// Discards progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ScanProgress for NoProgress {
    fn advance(&self, _records: u64) {}
}

/// Lock-free count of completed records.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    completed: AtomicU64,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }
}

impl ScanProgress for ProgressCounter {
    fn advance(&self, records: u64) {
        self.completed.fetch_add(records, Ordering::Relaxed);
    }
}

impl<P: ScanProgress + ?Sized> ScanProgress for &P {
    fn advance(&self, records: u64) {
        (**self).advance(records);
    }
}
