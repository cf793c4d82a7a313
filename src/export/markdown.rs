//! Markdown table export.

use std::io::Write;

use crate::error::Result;
use crate::model::{ExportRow, EXPORT_COLUMNS};

use super::ExportWriter;

/// Writes rows as a Markdown table.
#[derive(Debug, Clone, Default)]
pub struct MarkdownWriter {
    _private: (),
}

impl MarkdownWriter {
    /// Create a new Markdown writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

/// Escape table-breaking characters and keep cells on one line.
fn escape_cell(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.trim().chars() {
        match c {
            '\\' | '|' | '`' | '*' | '_' => {
                result.push('\\');
                result.push(c);
            }
            '\n' => result.push_str("<br>"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

fn table_row<'a>(cells: impl IntoIterator<Item = &'a str>, escape: bool) -> String {
    let mut line = String::from("|");
    for cell in cells {
        let content = if escape {
            escape_cell(cell)
        } else {
            cell.to_string()
        };
        line.push_str(&format!(" {} |", content));
    }
    line.push('\n');
    line
}

impl ExportWriter for MarkdownWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn name(&self) -> &str {
        "markdown"
    }

    fn write(&self, rows: &[ExportRow], out: &mut dyn Write) -> Result<()> {
        let mut output = table_row(EXPORT_COLUMNS, false);
        output.push_str(&table_row(EXPORT_COLUMNS.map(|_| "---"), false));
        for row in rows {
            output.push_str(&table_row(row.cells(), true));
        }
        out.write_all(output.as_bytes())?;
        Ok(())
    }
}
