use std::io;

use dx_core::{ProgressCounter, ScanError, Scanner, resolve};
use dx_model::{
    Corpus, Dictionary, DictionaryEntry, MatchRecord, MemorySink, ResultSink, ScanConfig,
};

fn dictionary() -> Dictionary {
    Dictionary::new(vec![
        DictionaryEntry::new("Heroin", ["heroin", "diacetylmorphine"], ["opioid"]).unwrap(),
        DictionaryEntry::new("Cocaine", ["cocaine"], ["stimulant"]).unwrap(),
        DictionaryEntry::new("Ethanol", ["ethanol", "ethyl alcohol"], ["alcohol"]).unwrap(),
    ])
    .unwrap()
}

fn corpus_texts() -> Vec<String> {
    (0..240)
        .map(|i| match i % 6 {
            0 => "Acute heroin toxicity".to_string(),
            1 => "cocaine and heroine".to_string(),
            2 => String::new(),
            3 => "positive for ethyl alcohol".to_string(),
            4 => "no drugs found".to_string(),
            _ => format!("case {i}: Cocaine!"),
        })
        .collect()
}

#[test]
fn strict_scan_reports_exact_hit() {
    let dictionary = dictionary();
    let scanner = Scanner::new(&dictionary, ScanConfig::strict()).unwrap();
    let hits = scanner.scan(&["heroin use"]);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].row_index, 0);
    assert_eq!(hits[0].drug_name, "Heroin");
    assert_eq!(hits[0].word_found, "heroin");
    assert_eq!(hits[0].similarity_ratio, 1.0);
    assert!(hits[0].tags.contains("opioid"));
}

#[test]
fn two_drugs_in_one_record_follow_dictionary_order() {
    let dictionary = dictionary();
    let scanner = Scanner::new(&dictionary, ScanConfig::default()).unwrap();
    let hits = scanner.scan(&["cocaine and heroine"]);
    let names: Vec<&str> = hits.iter().map(|h| h.drug_name.as_str()).collect();
    assert_eq!(names, vec!["Heroin", "Cocaine"]);
    assert!(hits.iter().all(|h| h.row_index == 0));

    let records = resolve(hits, &["CASE-9"]).unwrap();
    assert!(records.iter().all(|r| r.record_id == "CASE-9"));
}

#[test]
fn empty_inputs_yield_no_hits() {
    let dictionary = dictionary();
    let scanner = Scanner::new(&dictionary, ScanConfig::default()).unwrap();
    let none: [&str; 0] = [];
    assert!(scanner.scan(&none).is_empty());

    let empty = Dictionary::default();
    let scanner = Scanner::new(&empty, ScanConfig::default()).unwrap();
    assert!(scanner.scan(&["heroin"]).is_empty());
}

#[test]
fn hits_iterator_is_lazy() {
    let dictionary = dictionary();
    let counter = ProgressCounter::new();
    let scanner = Scanner::new(&dictionary, ScanConfig::strict())
        .unwrap()
        .with_progress(&counter);
    let records = ["heroin", "heroin", "heroin"];
    let first = scanner.hits(&records).next().expect("first hit");
    assert_eq!(first.row_index, 0);
    assert_eq!(counter.completed(), 1);
}

#[test]
fn parallel_scan_preserves_order() {
    let dictionary = dictionary();
    let texts = corpus_texts();
    let scanner = Scanner::new(&dictionary, ScanConfig::default()).unwrap();
    let sequential = scanner.scan(&texts);
    let parallel = scanner.scan_parallel(&texts, 4).unwrap();
    assert!(!sequential.is_empty());
    assert_eq!(sequential, parallel);
}

#[test]
fn progress_counts_every_record() {
    let dictionary = dictionary();
    let texts = corpus_texts();
    let counter = ProgressCounter::new();
    let scanner = Scanner::new(&dictionary, ScanConfig::default())
        .unwrap()
        .with_progress(&counter);
    scanner.scan_parallel(&texts, 3).unwrap();
    assert_eq!(counter.completed(), texts.len() as u64);
}

#[test]
fn streaming_scan_matches_batch_scan() {
    let dictionary = dictionary();
    let texts = corpus_texts();
    let ids: Vec<String> = (0..texts.len()).map(|i| format!("ID-{i:04}")).collect();
    let corpus = Corpus::new(ids.clone(), texts.clone()).unwrap();

    let batch = {
        let scanner = Scanner::new(&dictionary, ScanConfig::default()).unwrap();
        resolve(scanner.scan(&texts), &ids).unwrap()
    };

    for jobs in [1, 4] {
        let config = ScanConfig::default().with_jobs(jobs).with_chunk_size(7);
        let scanner = Scanner::new(&dictionary, config).unwrap();
        let mut sink = MemorySink::new();
        let summary = scanner.scan_into(&corpus, &mut sink).unwrap();

        assert_eq!(sink.records(), batch.as_slice(), "jobs={jobs}");
        assert_eq!(summary.records, texts.len());
        assert_eq!(summary.hits, batch.len());
        // Every record except the empty and drug-free ones has a hit.
        assert_eq!(summary.records_with_hit, 160);
        assert_eq!(summary.hits_for("Heroin"), 80);
        assert_eq!(summary.hits_for("Cocaine"), 80);
        assert_eq!(summary.hits_for("Ethanol"), 40);
    }
}

struct FailingSink {
    limit: usize,
    written: Vec<MatchRecord>,
}

impl ResultSink for FailingSink {
    fn append(&mut self, record: &MatchRecord) -> io::Result<()> {
        if self.written.len() == self.limit {
            return Err(io::Error::other("disk full"));
        }
        self.written.push(record.clone());
        Ok(())
    }

    fn appended(&self) -> usize {
        self.written.len()
    }
}

#[test]
fn sink_failure_aborts_scan() {
    let dictionary = dictionary();
    let corpus = Corpus::new(
        vec!["A".into(), "B".into(), "C".into()],
        vec!["heroin".into(), "cocaine".into(), "heroin".into()],
    )
    .unwrap();
    let scanner = Scanner::new(&dictionary, ScanConfig::strict()).unwrap();
    let mut sink = FailingSink {
        limit: 1,
        written: Vec::new(),
    };

    let err = scanner.scan_into(&corpus, &mut sink).unwrap_err();
    match err {
        ScanError::Sink { record_id, source } => {
            assert_eq!(record_id, "B");
            assert_eq!(source.to_string(), "disk full");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sink.appended(), 1);
}
