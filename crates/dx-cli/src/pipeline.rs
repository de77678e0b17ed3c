//! Extraction run: dictionary, corpus, scan, output.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use dx_core::{ScanSummary, Scanner};
use dx_dictionary::{LoadedDictionary, load_default_dictionary};
use dx_ingest::read_corpus;
use dx_model::text::tokenize;
use dx_model::{Corpus, ScanConfig};
use dx_output::JsonLinesSink;
use tracing::{info, info_span, trace};

use crate::logging::redact_value;
use crate::progress::ScanProgressBar;

/// Inputs of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub input: PathBuf,
    /// Column holding record ids; row positions are used when absent.
    pub id_column: Option<String>,
    pub target_column: String,
    pub output: PathBuf,
    pub dictionary: Option<PathBuf>,
    pub config: ScanConfig,
    pub show_progress: bool,
}

#[derive(Debug)]
pub struct ExtractResult {
    pub dictionary: LoadedDictionary,
    pub summary: ScanSummary,
    pub output: PathBuf,
    /// Records whose target text has no tokens after normalization.
    pub blank_records: usize,
}

/// Runs the streaming scan and appends matches to `request.output`.
pub fn run_extract(request: &ExtractRequest) -> Result<ExtractResult> {
    let span = info_span!(
        "extract",
        input = %request.input.display(),
        target_column = %request.target_column
    );
    let _guard = span.enter();
    let start = Instant::now();

    let dictionary = load_default_dictionary(request.dictionary.as_deref())
        .context("load drug dictionary")?;
    let corpus = read_corpus(
        &request.input,
        request.id_column.as_deref(),
        &request.target_column,
    )
    .with_context(|| format!("read {}", request.input.display()))?;
    let blank_records = count_blank_records(&corpus);

    let progress = ScanProgressBar::new(corpus.len(), request.show_progress);
    let scanner = Scanner::new(&dictionary.dictionary, request.config.clone())
        .context("configure scan")?
        .with_progress(&progress);
    let mut sink = JsonLinesSink::open(&request.output)
        .with_context(|| format!("open {}", request.output.display()))?;
    let summary = scanner.scan_into(&corpus, &mut sink);
    progress.finish();
    let summary = summary.with_context(|| format!("scan {}", request.input.display()))?;
    let output = sink.path().to_path_buf();

    info!(
        records = summary.records,
        hits = summary.hits,
        blank_records,
        output = %output.display(),
        duration_ms = start.elapsed().as_millis(),
        "extraction complete"
    );
    Ok(ExtractResult {
        dictionary,
        summary,
        output,
        blank_records,
    })
}

fn count_blank_records(corpus: &Corpus) -> usize {
    let mut blank = 0;
    for (id, text) in corpus.ids().iter().zip(corpus.texts()) {
        if tokenize(text).is_empty() {
            trace!(record_id = redact_value(id), "blank target text");
            blank += 1;
        }
    }
    blank
}

/// Directory holding `output`, for cleaning before a run.
pub fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_file_name_lives_in_current_dir() {
        assert_eq!(output_dir(Path::new("output.jsonl")), Path::new("."));
        assert_eq!(output_dir(Path::new("out/output.jsonl")), Path::new("out"));
    }

    #[test]
    fn punctuation_only_text_counts_as_blank() {
        let corpus = Corpus::new(
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            vec![";;".into(), "   ".into(), "heroin".into(), "- , -".into()],
        )
        .unwrap();
        assert_eq!(count_blank_records(&corpus), 3);
    }
}
