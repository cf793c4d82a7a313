//! Export writers for comparison rows.
//!
//! Writers are registered by file extension and selected from the output
//! path, the same way converters are dispatched by input extension.
//!
//! # Example
//!
//! ```no_run
//! use secdiff::export::{ExportOutcome, WriterRegistry};
//! use secdiff::ExportRow;
//! use std::path::Path;
//!
//! fn main() -> secdiff::Result<()> {
//!     let rows = vec![ExportRow::numeric("Rates", "fee", "0", "5")];
//!     let registry = WriterRegistry::with_defaults();
//!
//!     match registry.export(&rows, Path::new("changes.csv"))? {
//!         ExportOutcome::Written { rows, .. } => println!("{} rows written", rows),
//!         ExportOutcome::Empty => println!("Nothing to export"),
//!     }
//!     Ok(())
//! }
//! ```

mod csv;
mod json;
mod markdown;

pub use csv::CsvWriter;
pub use json::{to_json, JsonFormat, JsonWriter};
pub use markdown::MarkdownWriter;

use crate::error::{Error, Result};
use crate::model::ExportRow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Trait for export writers.
///
/// Implement this trait to add a new export format. Writers are never
/// called with an empty row set.
pub trait ExportWriter: Send + Sync {
    /// File extensions handled by this writer, lowercase without the dot.
    fn supported_extensions(&self) -> &[&str];

    /// Name of this writer.
    fn name(&self) -> &str;

    /// Write `rows` to `out`.
    fn write(&self, rows: &[ExportRow], out: &mut dyn Write) -> Result<()>;

    /// Check if this writer supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Rows were written to `path`
    Written { path: PathBuf, rows: usize },
    /// There were no rows; no file was created
    Empty,
}

/// Registry for export writers.
pub struct WriterRegistry {
    writers: HashMap<String, Arc<dyn ExportWriter>>,
    by_name: HashMap<String, Arc<dyn ExportWriter>>,
}

impl WriterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            writers: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the CSV, JSON and Markdown writers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CsvWriter::new()));
        registry.register(Arc::new(JsonWriter::new()));
        registry.register(Arc::new(MarkdownWriter::new()));
        registry
    }

    /// Register a writer for all its extensions.
    pub fn register(&mut self, writer: Arc<dyn ExportWriter>) {
        for ext in writer.supported_extensions() {
            self.writers.insert(ext.to_lowercase(), writer.clone());
        }
        self.by_name.insert(writer.name().to_lowercase(), writer);
    }

    /// Get a writer by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn ExportWriter>> {
        self.writers.get(&ext.to_lowercase()).cloned()
    }

    /// Get a writer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn ExportWriter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.writers.contains_key(&ext.to_lowercase())
    }

    /// Writer for an output path, chosen by its extension.
    pub fn writer_for_path(&self, path: &Path) -> Result<Arc<dyn ExportWriter>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Export(format!("{} has no extension", path.display())))?;

        self.get_by_extension(ext)
            .ok_or_else(|| Error::Export(format!("No writer for extension: {}", ext)))
    }

    /// Export rows to `path`.
    ///
    /// An empty row set is reported as [`ExportOutcome::Empty`] without
    /// touching the file system.
    pub fn export(&self, rows: &[ExportRow], path: &Path) -> Result<ExportOutcome> {
        let writer = self.writer_for_path(path)?;
        if rows.is_empty() {
            log::info!("No differences to export, skipping {}", path.display());
            return Ok(ExportOutcome::Empty);
        }

        let mut out = BufWriter::new(File::create(path)?);
        writer.write(rows, &mut out)?;
        out.flush()?;

        Ok(ExportOutcome::Written {
            path: path.to_path_buf(),
            rows: rows.len(),
        })
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Render rows with `writer` into a string.
pub fn write_to_string(writer: &dyn ExportWriter, rows: &[ExportRow]) -> Result<String> {
    let mut buffer = Vec::new();
    writer.write(rows, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::Export(e.to_string()))
}
