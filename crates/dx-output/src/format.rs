//! Conversion of JSON-lines match output into JSON or CSV.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};

use dx_model::MatchRecord;
use tracing::info;

use crate::error::OutputError;

/// Column order of the CSV export.
pub const CSV_HEADER: [&str; 5] = [
    "record_id",
    "drug_name",
    "word_found",
    "similarity_ratio",
    "tags",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// A single `{"data": [...]}` document.
    Json,
    /// One row per match; tags joined by `;`.
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `output.jsonl` becomes `output.csv` and so on.
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

/// Streaming reader over a JSON-lines match file. Blank lines are skipped.
#[derive(Debug)]
pub struct JsonLines {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line: usize,
}

impl Iterator for JsonLines {
    type Item = Result<MatchRecord, OutputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(OutputError::io(&self.path, e))),
            };
            self.line += 1;
            if text.trim().is_empty() {
                continue;
            }
            return Some(
                serde_json::from_str(&text).map_err(|source| OutputError::Json {
                    path: self.path.clone(),
                    line: self.line,
                    source,
                }),
            );
        }
    }
}

/// Opens a JSON-lines match file for streaming.
pub fn read_jsonl(path: &Path) -> Result<JsonLines, OutputError> {
    let file = File::open(path).map_err(|e| OutputError::io(path, e))?;
    Ok(JsonLines {
        path: path.to_path_buf(),
        lines: BufReader::new(file).lines(),
        line: 0,
    })
}

/// Converts a JSON-lines match file, returning the number of records written.
///
/// Records are streamed; the input is never held in memory as a whole.
pub fn convert(input: &Path, format: OutputFormat, output: &Path) -> Result<usize, OutputError> {
    let records = read_jsonl(input)?;
    let file = File::create(output).map_err(|e| OutputError::io(output, e))?;
    let count = match format {
        OutputFormat::Json => write_json(records, BufWriter::new(file), output)?,
        OutputFormat::Csv => write_csv(records, file, output)?,
    };
    info!(
        input = %input.display(),
        output = %output.display(),
        format = %format,
        records = count,
        "converted matches"
    );
    Ok(count)
}

fn write_json<W: Write>(records: JsonLines, mut out: W, path: &Path) -> Result<usize, OutputError> {
    let io_err = |e| OutputError::io(path, e);
    out.write_all(b"{\"data\":[").map_err(io_err)?;
    let mut count = 0;
    for record in records {
        let record = record?;
        if count > 0 {
            out.write_all(b",").map_err(io_err)?;
        }
        out.write_all(b"\n").map_err(io_err)?;
        serde_json::to_writer(&mut out, &record).map_err(|e| io_err(e.into()))?;
        count += 1;
    }
    out.write_all(b"\n]}\n").map_err(io_err)?;
    out.flush().map_err(io_err)?;
    Ok(count)
}

fn write_csv(records: JsonLines, out: File, path: &Path) -> Result<usize, OutputError> {
    let csv_err = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER).map_err(csv_err)?;
    let mut count = 0;
    for record in records {
        let record = record?;
        let tags = record.tags.iter().map(String::as_str).collect::<Vec<_>>().join(";");
        writer
            .write_record([
                record.record_id.as_str(),
                record.drug_name.as_str(),
                record.word_found.as_str(),
                record.similarity_ratio.to_string().as_str(),
                tags.as_str(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }
    writer.flush().map_err(|e| OutputError::io(path, e))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_swaps_extension() {
        assert_eq!(
            default_output_path(Path::new("out/output.jsonl"), OutputFormat::Csv),
            PathBuf::from("out/output.csv")
        );
    }
}
