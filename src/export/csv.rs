//! CSV export.

use std::io::Write;

use crate::error::Result;
use crate::model::{ExportRow, EXPORT_COLUMNS};

use super::ExportWriter;

/// Writes rows as RFC 4180 CSV with a header line.
#[derive(Debug, Clone, Default)]
pub struct CsvWriter {
    _private: (),
}

impl CsvWriter {
    /// Create a new CSV writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

/// Quote a field when it contains a delimiter, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_record<'a>(out: &mut dyn Write, fields: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let line = fields
        .into_iter()
        .map(escape_field)
        .collect::<Vec<_>>()
        .join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")?;
    Ok(())
}

impl ExportWriter for CsvWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["csv"]
    }

    fn name(&self) -> &str {
        "csv"
    }

    fn write(&self, rows: &[ExportRow], out: &mut dyn Write) -> Result<()> {
        write_record(out, EXPORT_COLUMNS)?;
        for row in rows {
            write_record(out, row.cells())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::write_to_string;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_output() {
        let rows = vec![
            ExportRow::numeric("Rates", "fee", "0", "5"),
            ExportRow::textual("Intro, part 1", "old line", ""),
        ];
        let csv = write_to_string(&CsvWriter::new(), &rows).unwrap();
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(
            lines[0],
            "Section Title,Category,Old Value,New Value,Difference Type"
        );
        assert_eq!(lines[1], "Rates,fee,0,5,Numeric");
        assert_eq!(lines[2], "\"Intro, part 1\",,old line,,Textual");
    }
}
