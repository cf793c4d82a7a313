//! Comparison state owned by a single controller.

use std::path::Path;

use crate::error::{Error, Result};
use crate::export::{ExportOutcome, WriterRegistry};
use crate::model::{DocumentSections, ExportRow, SectionComparison};

use super::aligner::{align_sections, TitleSelection};
use super::differ::compare_sections;
use super::options::CompareMode;
use super::rows::build_rows;

/// Holds both documents' sections, the combined title selection and the
/// comparison mode.
///
/// Replacing either document rebuilds the title selection from scratch;
/// flags set on the previous selection are not carried over.
///
/// # Example
///
/// ```
/// use secdiff::compare::{CompareMode, ComparisonSession};
/// use secdiff::{DocumentSections, ExtractedSection, SegmentationMode};
///
/// let doc = |text: &str| DocumentSections {
///     mode: SegmentationMode::Toc,
///     page_count: 1,
///     sections: vec![ExtractedSection::new("Rates", text)],
/// };
///
/// let mut session = ComparisonSession::new(CompareMode::NumericOnly);
/// session.set_old(doc("rate = 10"));
/// session.set_new(doc("rate = 12"));
///
/// let rows = session.export_rows().unwrap();
/// assert_eq!(rows[0].new_value, "12");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComparisonSession {
    old: Option<DocumentSections>,
    new: Option<DocumentSections>,
    selection: TitleSelection,
    mode: CompareMode,
}

impl ComparisonSession {
    /// Create an empty session.
    pub fn new(mode: CompareMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Create a session with both documents loaded.
    pub fn with_documents(old: DocumentSections, new: DocumentSections, mode: CompareMode) -> Self {
        let mut session = Self::new(mode);
        session.old = Some(old);
        session.new = Some(new);
        session.realign();
        session
    }

    /// Replace the old document.
    pub fn set_old(&mut self, sections: DocumentSections) {
        self.old = Some(sections);
        self.realign();
    }

    /// Replace the new document.
    pub fn set_new(&mut self, sections: DocumentSections) {
        self.new = Some(sections);
        self.realign();
    }

    /// Drop the old document.
    pub fn clear_old(&mut self) {
        self.old = None;
        self.realign();
    }

    /// Drop the new document.
    pub fn clear_new(&mut self) {
        self.new = None;
        self.realign();
    }

    pub fn old(&self) -> Option<&DocumentSections> {
        self.old.as_ref()
    }

    pub fn new_document(&self) -> Option<&DocumentSections> {
        self.new.as_ref()
    }

    pub fn mode(&self) -> CompareMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CompareMode) {
        self.mode = mode;
    }

    /// Combined titles and their selection flags.
    pub fn selection(&self) -> &TitleSelection {
        &self.selection
    }

    /// Select or deselect a title. Returns `false` for unknown titles.
    pub fn set_selected(&mut self, title: &str, selected: bool) -> bool {
        self.selection.set(title, selected)
    }

    pub fn select_all(&mut self) {
        self.selection.set_all(true);
    }

    pub fn deselect_all(&mut self) {
        self.selection.set_all(false);
    }

    /// Keep only `titles` selected. Returns titles that are not known.
    pub fn select_only<'a>(&mut self, titles: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        self.deselect_all();
        titles
            .into_iter()
            .filter(|title| !self.selection.set(title, true))
            .collect()
    }

    /// Whether both documents are loaded.
    pub fn is_ready(&self) -> bool {
        self.old.is_some() && self.new.is_some()
    }

    fn realign(&mut self) {
        let old = self.old.as_ref().map_or(&[][..], |d| d.sections.as_slice());
        let new = self.new.as_ref().map_or(&[][..], |d| d.sections.as_slice());
        self.selection = align_sections(old, new);
    }

    fn documents(&self) -> Result<(&DocumentSections, &DocumentSections)> {
        match (&self.old, &self.new) {
            (Some(old), Some(new)) => Ok((old, new)),
            _ => Err(Error::Other(
                "Both documents must be loaded before comparing".to_string(),
            )),
        }
    }

    /// Compare all selected sections that changed.
    pub fn compare(&self) -> Result<Vec<SectionComparison>> {
        let (old, new) = self.documents()?;
        let results = compare_sections(old, new, &self.selection, self.mode);
        log::debug!(
            "{} of {} selected sections changed",
            results.len(),
            self.selection.selected_titles().count()
        );
        Ok(results)
    }

    /// Rows for the spreadsheet writer.
    pub fn export_rows(&self) -> Result<Vec<ExportRow>> {
        Ok(build_rows(&self.compare()?))
    }

    /// Compare and write the rows to `path`, format chosen by extension.
    pub fn export_to_path(&self, registry: &WriterRegistry, path: &Path) -> Result<ExportOutcome> {
        let rows = self.export_rows()?;
        registry.export(&rows, path)
    }
}
