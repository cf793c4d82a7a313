//! JSON export.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::ExportRow;

use super::ExportWriter;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any value as JSON in the given format.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Export(format!("JSON serialization error: {}", e)))
}

/// Writes rows as a JSON array of objects.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    format: JsonFormat,
}

impl JsonWriter {
    /// Create a pretty-printing JSON writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl ExportWriter for JsonWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn write(&self, rows: &[ExportRow], out: &mut dyn Write) -> Result<()> {
        let json = to_json(rows, self.format)?;
        out.write_all(json.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::write_to_string;

    #[test]
    fn test_json_rows() {
        let rows = vec![ExportRow::numeric("Rates", "fee", "0", "5")];
        let json = write_to_string(&JsonWriter::new(), &rows).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["section_title"], "Rates");
        assert_eq!(value[0]["difference_type"], "Numeric");
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_json_compact() {
        let rows = vec![ExportRow::textual("Intro", "a", "b")];
        let json = to_json(&rows, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        // Textual rows carry no category
        assert!(!json.contains("category"));
    }
}
