//! Batch scan over a corpus.
//!
//! Every record is normalized once, then matched against each dictionary
//! entry in dictionary order. Hits come out ordered by record position and,
//! within a record, by dictionary order, whether the scan runs on the calling
//! thread or on a rayon pool.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use dx_match::Matcher;
use dx_model::text::normalize;
use dx_model::{Corpus, Dictionary, ResultSink, ScanConfig, ScanHit};
use rayon::prelude::*;
use tracing::{debug, info, info_span, trace};

use crate::error::ScanError;
use crate::progress::{NoProgress, ScanProgress};
use crate::reconcile::resolve_hit;

static NO_PROGRESS: NoProgress = NoProgress;

/// Counters for a completed streaming scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    pub records: usize,
    pub hits: usize,
    /// Records with at least one hit.
    pub records_with_hit: usize,
    /// Hits per drug name.
    pub per_drug: BTreeMap<String, usize>,
    pub duration: Duration,
}

impl ScanSummary {
    pub fn hits_for(&self, drug_name: &str) -> usize {
        self.per_drug.get(drug_name).copied().unwrap_or(0)
    }
}

/// Runs the matcher over records.
///
/// The scanner borrows the dictionary and is `Sync`; parallel scans share it
/// across workers by reference.
pub struct Scanner<'a> {
    dictionary: &'a Dictionary,
    matcher: Matcher,
    config: ScanConfig,
    progress: &'a dyn ScanProgress,
}

impl<'a> Scanner<'a> {
    /// Builds a scanner after validating `config`.
    pub fn new(dictionary: &'a Dictionary, config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        Ok(Self {
            dictionary,
            matcher: Matcher::new(&config),
            config,
            progress: &NO_PROGRESS,
        })
    }

    /// Reports one tick per completed record to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: &'a dyn ScanProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        self.dictionary
    }

    /// Matches one record against every entry.
    pub fn scan_record(&self, row_index: usize, text: &str) -> Vec<ScanHit> {
        let normalized = normalize(text);
        let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
        let mut hits = Vec::new();
        if !tokens.is_empty() {
            for entry in self.dictionary {
                let Some(outcome) = self.matcher.find_in_tokens(entry, &tokens) else {
                    continue;
                };
                trace!(
                    row_index,
                    drug = entry.name(),
                    similarity = outcome.similarity_ratio,
                    "match"
                );
                hits.push(ScanHit {
                    row_index,
                    drug_name: entry.name().to_string(),
                    similarity_ratio: outcome.similarity_ratio,
                    word_found: outcome.word_found,
                    tags: entry.tags().clone(),
                });
            }
        }
        self.progress.advance(1);
        hits
    }

    /// Lazily scans `records`, yielding hits as each record is processed.
    pub fn hits<I>(&self, records: I) -> impl Iterator<Item = ScanHit>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        records
            .into_iter()
            .enumerate()
            .flat_map(move |(row_index, text)| self.scan_record(row_index, text.as_ref()))
    }

    /// Scans `records` on the calling thread.
    pub fn scan<S: AsRef<str>>(&self, records: &[S]) -> Vec<ScanHit> {
        self.hits(records).collect()
    }

    /// Scans `records` on a pool of `jobs` threads.
    ///
    /// Output order is identical to [`Scanner::scan`]. `jobs <= 1` scans on
    /// the calling thread.
    pub fn scan_parallel<S: AsRef<str> + Sync>(
        &self,
        records: &[S],
        jobs: usize,
    ) -> Result<Vec<ScanHit>, ScanError> {
        if jobs <= 1 {
            return Ok(self.scan(records));
        }
        let pool = build_pool(jobs)?;
        let start = Instant::now();
        let hits = pool.install(|| self.scan_chunk_parallel(records, 0));
        info!(
            records = records.len(),
            hits = hits.len(),
            jobs,
            duration_ms = start.elapsed().as_millis(),
            "parallel scan complete"
        );
        Ok(hits)
    }

    /// Streams resolved matches into `sink`, chunk by chunk.
    ///
    /// Ids come from the corpus id column. The first failed write aborts the
    /// scan; records already appended stay in the sink.
    pub fn scan_into<K>(&self, corpus: &Corpus, sink: &mut K) -> Result<ScanSummary, ScanError>
    where
        K: ResultSink + ?Sized,
    {
        let span = info_span!(
            "scan",
            records = corpus.len(),
            entries = self.dictionary.len(),
            mode = ?self.config.mode,
            jobs = self.config.jobs
        );
        let _guard = span.enter();
        let start = Instant::now();

        let pool = if self.config.jobs > 1 {
            Some(build_pool(self.config.jobs)?)
        } else {
            None
        };

        let mut summary = ScanSummary {
            records: corpus.len(),
            ..ScanSummary::default()
        };
        let chunk_size = self.config.chunk_size;
        for (chunk_index, chunk) in corpus.texts().chunks(chunk_size).enumerate() {
            let offset = chunk_index * chunk_size;
            let hits = match &pool {
                Some(pool) => pool.install(|| self.scan_chunk_parallel(chunk, offset)),
                None => chunk
                    .iter()
                    .enumerate()
                    .flat_map(|(i, text)| self.scan_record(offset + i, text))
                    .collect(),
            };

            let mut last_row = None;
            let chunk_hits = hits.len();
            for hit in hits {
                if last_row != Some(hit.row_index) {
                    summary.records_with_hit += 1;
                    last_row = Some(hit.row_index);
                }
                let record = resolve_hit(hit, corpus.ids())?;
                if let Err(source) = sink.append(&record) {
                    return Err(ScanError::Sink {
                        record_id: record.record_id,
                        source,
                    });
                }
                summary.hits += 1;
                *summary.per_drug.entry(record.drug_name).or_default() += 1;
            }
            debug!(
                chunk = chunk_index,
                records = chunk.len(),
                hits = chunk_hits,
                "chunk written"
            );
        }

        summary.duration = start.elapsed();
        info!(
            records = summary.records,
            hits = summary.hits,
            records_with_hit = summary.records_with_hit,
            duration_ms = summary.duration.as_millis(),
            "scan complete"
        );
        Ok(summary)
    }

    fn scan_chunk_parallel<S: AsRef<str> + Sync>(&self, chunk: &[S], offset: usize) -> Vec<ScanHit> {
        chunk
            .par_iter()
            .enumerate()
            .flat_map_iter(|(i, text)| self.scan_record(offset + i, text.as_ref()))
            .collect()
    }
}

fn build_pool(jobs: usize) -> Result<rayon::ThreadPool, ScanError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|index| format!("dx-scan-{index}"))
        .build()
        .map_err(|source| ScanError::ThreadPool { jobs, source })
}
