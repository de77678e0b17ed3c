use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use dx_model::Corpus;
use tracing::{debug, info};

use crate::error::IngestError;

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}')
}

/// Finds a column by name, ignoring case, surrounding whitespace, and a
/// leading byte-order mark.
///
/// Returns the position of the first matching header.
pub fn find_column<S: AsRef<str>>(headers: &[S], name: &str) -> Option<usize> {
    let wanted = normalize_header(name);
    headers
        .iter()
        .position(|header| normalize_header(header.as_ref()).eq_ignore_ascii_case(&wanted))
}

/// Reads the id and text columns of a CSV file with a header row.
///
/// Without an id column, ids are the 0-based positions of the kept rows.
/// Rows whose cells are all blank are skipped. Short rows are rejected rather
/// than padded, so every text in the corpus is paired with a real id.
pub fn read_corpus(
    path: &Path,
    id_column: Option<&str>,
    target_column: &str,
) -> Result<Corpus, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let corpus = read_corpus_from_reader(file, &path.display().to_string(), id_column, target_column)?;
    info!(
        path = %path.display(),
        records = corpus.len(),
        "corpus loaded"
    );
    Ok(corpus)
}

/// Like [`read_corpus`], over any reader. `origin` names the source in errors.
pub fn read_corpus_from_reader<R: Read>(
    reader: R,
    origin: &str,
    id_column: Option<&str>,
    target_column: &str,
) -> Result<Corpus, IngestError> {
    let csv_error = |source: csv::Error| IngestError::Csv {
        origin: origin.to_string(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    let column = |name: &str| {
        find_column(headers.as_slice(), name).ok_or_else(|| IngestError::ColumnNotFound {
            column: name.to_string(),
            available: headers.clone(),
        })
    };
    let id_index = id_column.map(|name| column(name).map(|index| (index, name))).transpose()?;
    let text_index = column(target_column)?;
    debug!(
        id_index = ?id_index.map(|(index, _)| index),
        text_index,
        columns = headers.len(),
        "resolved columns"
    );

    let mut ids = Vec::new();
    let mut texts = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|cell| normalize_cell(cell).is_empty()) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        let cell = |index: usize, name: &str| {
            record
                .get(index)
                .map(normalize_cell)
                .ok_or_else(|| IngestError::MissingCell {
                    line,
                    column: name.to_string(),
                })
        };
        let id = match id_index {
            Some((index, name)) => cell(index, name)?.to_string(),
            None => texts.len().to_string(),
        };
        ids.push(id);
        texts.push(cell(text_index, target_column)?.to_string());
    }
    Ok(Corpus::new(ids, texts)?)
}
