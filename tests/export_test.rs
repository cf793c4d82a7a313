//! Integration tests for the export writers and registry.

use std::io::Write;
use std::sync::Arc;

use secdiff::compare::{CompareMode, ComparisonSession};
use secdiff::error::Result;
use secdiff::export::{
    write_to_string, CsvWriter, ExportOutcome, ExportWriter, JsonFormat, JsonWriter,
    WriterRegistry,
};
use secdiff::{DocumentSections, ExportRow, ExtractedSection, SegmentationMode};

/// Mock writer for testing.
struct MockWriter;

impl ExportWriter for MockWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["tsv"]
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn write(&self, rows: &[ExportRow], out: &mut dyn Write) -> Result<()> {
        for row in rows {
            writeln!(out, "{}", row.cells().join("\t"))?;
        }
        Ok(())
    }
}

fn doc(text: &str) -> DocumentSections {
    DocumentSections {
        mode: SegmentationMode::Toc,
        page_count: 1,
        sections: vec![ExtractedSection::new("Rates", text)],
    }
}

fn sample_rows() -> Vec<ExportRow> {
    vec![
        ExportRow::numeric("Rates", "fee", "0", "5"),
        ExportRow::textual("Terms", "Payment due in 30 days", "Payment due in 14 days"),
    ]
}

#[test]
fn test_register_custom_writer() {
    let mut registry = WriterRegistry::with_defaults();
    registry.register(Arc::new(MockWriter));

    assert!(registry.supports("TSV"));
    assert_eq!(registry.get_by_name("Mock").unwrap().name(), "mock");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("changes.tsv");
    registry.export(&sample_rows(), &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().next(), Some("Rates\tfee\t0\t5\tNumeric"));
}

#[test]
fn test_export_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("changes.csv");

    let outcome = WriterRegistry::with_defaults()
        .export(&sample_rows(), &path)
        .unwrap();
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: path.clone(),
            rows: 2
        }
    );

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Section Title,Category,Old Value,New Value,Difference Type"
    );
    assert_eq!(
        lines[2],
        "Terms,,Payment due in 30 days,Payment due in 14 days,Textual"
    );
}

#[test]
fn test_export_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("changes.JSON");

    WriterRegistry::with_defaults()
        .export(&sample_rows(), &path)
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["category"], "fee");
    assert!(rows[1].get("category").is_none());
}

#[test]
fn test_compact_json_writer() {
    let writer = JsonWriter::new().with_format(JsonFormat::Compact);
    let output = write_to_string(&writer, &sample_rows()).unwrap();
    assert_eq!(output.trim_end().lines().count(), 1);
}

#[test]
fn test_csv_quotes_multiline_values() {
    let rows = vec![ExportRow::textual("Rates", "line one\nline two", "")];
    let output = write_to_string(&CsvWriter::new(), &rows).unwrap();
    assert!(output.contains("\"line one\nline two\""));
}

#[test]
fn test_session_export_empty_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("changes.md");
    let session = ComparisonSession::with_documents(
        doc("rate = 10"),
        doc("rate = 10"),
        CompareMode::NumericOnly,
    );

    let outcome = session
        .export_to_path(&WriterRegistry::with_defaults(), &path)
        .unwrap();
    assert_eq!(outcome, ExportOutcome::Empty);
    assert!(!path.exists());
}

#[test]
fn test_session_export_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("changes.md");
    let session = ComparisonSession::with_documents(
        doc("rate = 10"),
        doc("rate = 12"),
        CompareMode::NumericOnly,
    );

    session
        .export_to_path(&WriterRegistry::with_defaults(), &path)
        .unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("| Rates | rate | 10 | 12 | Numeric |"));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("changes.xlsx");
    let result = WriterRegistry::with_defaults().export(&sample_rows(), &path);
    assert!(result.is_err());
    assert!(!path.exists());
}
