//! # secdiff
//!
//! Section-aware comparison of two versions of a PDF document.
//!
//! Each document is split into named sections using its outline (table of
//! contents), or page by page when no usable outline exists. Sections with
//! the same title are then compared either as a line diff of their text or
//! as a per-key comparison of `key = value` lines, and the changes can be
//! exported as before/after rows.
//!
//! ## Quick Start
//!
//! ```no_run
//! use secdiff::{compare_files, CompareOptions};
//!
//! fn main() -> secdiff::Result<()> {
//!     let report = compare_files("rates-2023.pdf", "rates-2024.pdf", &CompareOptions::default())?;
//!
//!     for notice in report.disclaimers() {
//!         eprintln!("{}", notice);
//!     }
//!     for section in &report.sections {
//!         println!("{}: {} changes", section.title, section.changes.change_count());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline segmentation**: explicit, named and action destinations
//! - **Page fallback**: one section per page when there is no outline
//! - **Full-text and numeric diffs**: line diff or `key = value` comparison
//! - **Export**: CSV, JSON and Markdown rows of before/after values
//! - **Parallel extraction**: both documents are read concurrently with Rayon

pub mod compare;
pub mod detect;
pub mod error;
pub mod export;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod section;

// Re-export commonly used types
pub use compare::{
    CompareMode, CompareOptions, ComparisonReport, ComparisonSession, DocumentSummary,
};
pub use detect::{validate_input, PdfHeader};
pub use error::{Error, Result};
pub use export::{ExportOutcome, ExportWriter, JsonFormat, WriterRegistry};
pub use model::{
    Destination, DiffPart, DifferenceType, DocumentSections, ExportRow, ExtractedSection,
    NumericChange, OutlineNode, PageTarget, Section, SectionChanges, SectionComparison,
    SegmentationMode,
};
pub use parser::{DocumentHandle, ErrorMode, ExtractOptions, MemoryDocument, PdfDocument};
pub use section::segment_document;

use std::path::Path;

/// Attach the file name to a failure that does not already carry one.
fn name_failure(path: &Path, err: Error) -> Error {
    match err {
        Error::InvalidInput { .. } | Error::DocumentLoad { .. } => err,
        other => Error::document_load(path, other),
    }
}

/// Extract the sections of a PDF file.
///
/// # Arguments
///
/// * `path` - Path to the PDF file
/// * `options` - Extraction options
///
/// # Example
///
/// ```no_run
/// use secdiff::{load_sections, ExtractOptions};
///
/// let doc = load_sections("rates-2024.pdf", &ExtractOptions::default()).unwrap();
/// println!("{} sections ({})", doc.len(), doc.mode);
/// ```
pub fn load_sections<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> Result<DocumentSections> {
    let path = path.as_ref();
    let doc = PdfDocument::open(path)?;
    log::debug!("Loaded {} ({} pages)", path.display(), doc.page_count());

    segment_with_path(&doc, path, options)
}

/// Segment an opened document, naming `path` in any failure.
///
/// Use this instead of [`segment_document`] when the document came from a
/// file, so that strict-mode page failures say which file they belong to.
pub fn segment_with_path<H: DocumentHandle + ?Sized>(
    doc: &H,
    path: &Path,
    options: &ExtractOptions,
) -> Result<DocumentSections> {
    segment_document(doc, options).map_err(|e| name_failure(path, e))
}

/// Extract the sections of a PDF held in memory.
pub fn load_sections_from_bytes(data: &[u8], options: &ExtractOptions) -> Result<DocumentSections> {
    let doc = PdfDocument::from_bytes(data)?;
    segment_document(&doc, options)
}

/// Extract both documents of a comparison.
///
/// Both files are validated before either is read. With
/// [`ExtractOptions::parallel`] set, the two documents are extracted
/// concurrently; the call returns only when both are done.
pub fn load_pair<P: AsRef<Path>, Q: AsRef<Path>>(
    old: P,
    new: Q,
    options: &ExtractOptions,
) -> Result<(DocumentSections, DocumentSections)> {
    let (old, new) = (old.as_ref(), new.as_ref());
    validate_input(old)?;
    validate_input(new)?;

    let (old_result, new_result) = if options.parallel {
        rayon::join(|| load_sections(old, options), || load_sections(new, options))
    } else {
        (load_sections(old, options), load_sections(new, options))
    };

    Ok((old_result?, new_result?))
}

fn build_report(
    old_path: &Path,
    new_path: &Path,
    old: DocumentSections,
    new: DocumentSections,
    mode: CompareMode,
) -> Result<ComparisonReport> {
    let old_summary = DocumentSummary::from_path(old_path, &old);
    let new_summary = DocumentSummary::from_path(new_path, &new);

    let session = ComparisonSession::with_documents(old, new, mode);
    let sections = session.compare()?;
    log::info!(
        "Compared {} with {}: {} changed sections",
        old_summary.name,
        new_summary.name,
        sections.len()
    );

    Ok(ComparisonReport::new(old_summary, new_summary, mode, sections))
}

/// Compare two PDF files section by section.
///
/// # Example
///
/// ```no_run
/// use secdiff::{compare_files, CompareOptions};
///
/// let options = CompareOptions::new().numeric_only();
/// let report = compare_files("old.pdf", "new.pdf", &options).unwrap();
/// println!("{}", report.to_json(secdiff::JsonFormat::Pretty).unwrap());
/// ```
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
    old: P,
    new: Q,
    options: &CompareOptions,
) -> Result<ComparisonReport> {
    let (old, new) = (old.as_ref(), new.as_ref());
    let (old_sections, new_sections) = load_pair(old, new, &options.extract)?;
    build_report(old, new, old_sections, new_sections, options.mode)
}

#[cfg(feature = "async")]
async fn spawn_load(path: std::path::PathBuf, options: ExtractOptions) -> Result<DocumentSections> {
    tokio::task::spawn_blocking(move || load_sections(&path, &options))
        .await
        .map_err(|e| Error::Other(format!("Extraction task failed: {}", e)))?
}

/// Compare two PDF files, extracting both on Tokio's blocking pool.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> secdiff::Result<()> {
/// use secdiff::{compare_files_async, CompareOptions};
///
/// let report = compare_files_async("old.pdf", "new.pdf", CompareOptions::default()).await?;
/// println!("{} changed sections", report.sections.len());
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "async")]
pub async fn compare_files_async<P: AsRef<Path>, Q: AsRef<Path>>(
    old: P,
    new: Q,
    options: CompareOptions,
) -> Result<ComparisonReport> {
    let (old, new) = (old.as_ref().to_path_buf(), new.as_ref().to_path_buf());
    validate_input(&old)?;
    validate_input(&new)?;

    let (old_sections, new_sections) = tokio::try_join!(
        spawn_load(old.clone(), options.extract.clone()),
        spawn_load(new.clone(), options.extract.clone()),
    )?;

    build_report(&old, &new, old_sections, new_sections, options.mode)
}

/// Builder for extracting and comparing documents.
///
/// # Example
///
/// ```no_run
/// use secdiff::SecDiff;
///
/// let outcome = SecDiff::new()
///     .numeric_only()
///     .strict()
///     .export("old.pdf", "new.pdf", "changes.csv")?;
/// println!("{:?}", outcome);
/// # Ok::<(), secdiff::Error>(())
/// ```
pub struct SecDiff {
    options: CompareOptions,
}

impl SecDiff {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: CompareOptions::default(),
        }
    }

    /// Compare `key = value` lines only.
    pub fn numeric_only(mut self) -> Self {
        self.options = self.options.numeric_only();
        self
    }

    /// Set comparison mode.
    pub fn with_mode(mut self, mode: CompareMode) -> Self {
        self.options = self.options.with_mode(mode);
        self
    }

    /// Fail on unreadable pages instead of skipping them.
    pub fn strict(mut self) -> Self {
        self.options.extract = self.options.extract.strict();
        self
    }

    /// Extract the two documents one after the other.
    pub fn sequential(mut self) -> Self {
        self.options.extract = self.options.extract.sequential();
        self
    }

    /// Enable or disable page text normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.options.extract = self.options.extract.with_normalization(normalize);
        self
    }

    /// Current options.
    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Extract the sections of one file.
    pub fn sections<P: AsRef<Path>>(&self, path: P) -> Result<DocumentSections> {
        load_sections(path, &self.options.extract)
    }

    /// Load both files into a session for interactive selection.
    pub fn session<P: AsRef<Path>, Q: AsRef<Path>>(&self, old: P, new: Q) -> Result<ComparisonSession> {
        let (old, new) = load_pair(old, new, &self.options.extract)?;
        Ok(ComparisonSession::with_documents(old, new, self.options.mode))
    }

    /// Compare two files.
    pub fn compare<P: AsRef<Path>, Q: AsRef<Path>>(&self, old: P, new: Q) -> Result<ComparisonReport> {
        compare_files(old, new, &self.options)
    }

    /// Compare two files and export the changes, format chosen by extension.
    pub fn export<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
        &self,
        old: P,
        new: Q,
        output: R,
    ) -> Result<ExportOutcome> {
        let registry = WriterRegistry::with_defaults();
        // Reject an unsupported output before reading either document
        registry.writer_for_path(output.as_ref())?;
        self.session(old, new)?.export_to_path(&registry, output.as_ref())
    }
}

impl Default for SecDiff {
    fn default() -> Self {
        Self::new()
    }
}
