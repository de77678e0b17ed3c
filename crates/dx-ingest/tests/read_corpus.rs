use std::fs;

use dx_ingest::{IngestError, read_corpus};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("records.csv");
    fs::write(&path, contents).expect("write csv");
    path
}

#[test]
fn reads_quoted_multiline_cells() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "\u{feff}Case Number,Primary Cause\n\
         ME-001,\"Acute heroin, fentanyl\ntoxicity\"\n\
         ME-002,Blunt force trauma\n",
    );
    let corpus = read_corpus(&path, Some("case number"), "primary cause").unwrap();
    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.ids()[0], "ME-001");
    assert_eq!(corpus.texts()[0], "Acute heroin, fentanyl\ntoxicity");
}

#[test]
fn missing_column_lists_available_headers() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "id,notes\n1,heroin\n");
    let err = read_corpus(&path, Some("id"), "cause").unwrap_err();
    match err {
        IngestError::ColumnNotFound { column, available } => {
            assert_eq!(column, "cause");
            assert_eq!(available, vec!["id", "notes"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn short_row_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "id,notes\n1,heroin\n2\n");
    let err = read_corpus(&path, Some("id"), "notes").unwrap_err();
    assert!(
        matches!(err, IngestError::MissingCell { line: 3, ref column } if column == "notes"),
        "got {err}"
    );
}

#[test]
fn header_only_file_is_empty_corpus() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "id,notes\n");
    let corpus = read_corpus(&path, Some("id"), "notes").unwrap();
    assert!(corpus.is_empty());
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.csv");
    let err = read_corpus(&path, Some("id"), "notes").unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
