use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use dx_model::{MatchRecord, ResultSink};
use tracing::debug;

use crate::error::OutputError;

/// File name the command line writes matches to by default.
pub const DEFAULT_OUTPUT_FILE: &str = "output.jsonl";

/// Appends match records to a JSON-lines file.
///
/// The file is opened once in append mode (created if absent). Every record is
/// written as one compact JSON object followed by `\n` and flushed before
/// `append` returns. The handle is closed on drop.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    writer: BufWriter<File>,
    appended: usize,
}

impl JsonLinesSink {
    pub fn open(path: &Path) -> Result<Self, OutputError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| OutputError::io(path, e))?;
        debug!(path = %path.display(), "opened match output");
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            appended: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonLinesSink {
    fn append(&mut self, record: &MatchRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.appended += 1;
        Ok(())
    }

    fn appended(&self) -> usize {
        self.appended
    }
}
