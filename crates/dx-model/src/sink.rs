//! Destination for resolved matches.

use std::io;

use crate::record::MatchRecord;

/// Append-only destination for match records.
///
/// Implementations persist each record as it arrives; callers never have to
/// hold the full result set before the first write.
pub trait ResultSink {
    /// Persists one record.
    ///
    /// # Errors
    ///
    /// Any I/O failure. Callers abort the scan on error rather than continue
    /// producing records that cannot be persisted.
    fn append(&mut self, record: &MatchRecord) -> io::Result<()>;

    /// Number of records appended so far.
    fn appended(&self) -> usize;
}

/// In-memory sink for small corpora and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<MatchRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MatchRecord> {
        self.records
    }
}

impl ResultSink for MemorySink {
    fn append(&mut self, record: &MatchRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn appended(&self) -> usize {
        self.records.len()
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn append(&mut self, record: &MatchRecord) -> io::Result<()> {
        (**self).append(record)
    }

    fn appended(&self) -> usize {
        (**self).appended()
    }
}
