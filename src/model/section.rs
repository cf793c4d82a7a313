//! Section types produced by segmentation and text extraction.

use serde::{Deserialize, Serialize};

/// A titled span of a document starting at `start_page`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Trimmed, non-empty title
    pub title: String,

    /// First page of the section (1-indexed)
    pub start_page: u32,

    /// Nesting depth in the outline (0 = top level)
    pub level: u32,

    /// Whether `start_page` came from a real destination rather than an estimate
    pub has_valid_page: bool,
}

impl Section {
    /// Create a section with a resolved start page.
    pub fn new(title: impl Into<String>, start_page: u32, level: u32) -> Self {
        Self {
            title: title.into(),
            start_page,
            level,
            has_valid_page: true,
        }
    }

    /// Create a section whose start page is only an estimate.
    pub fn estimated(title: impl Into<String>, start_page: u32, level: u32) -> Self {
        Self {
            has_valid_page: false,
            ..Self::new(title, start_page, level)
        }
    }
}

/// A section together with the text of all its pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Section title
    pub title: String,

    /// Concatenated page text
    pub text: String,

    /// First page included in `text`
    pub start_page: u32,

    /// Last page included in `text` (may be below `start_page` for empty spans)
    pub end_page: u32,

    /// Nesting depth in the outline
    pub level: u32,
}

impl ExtractedSection {
    /// Create an extracted section spanning a single page.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            start_page: 1,
            end_page: 1,
            level: 0,
        }
    }

    /// Number of pages covered by this section.
    pub fn page_span(&self) -> u32 {
        (self.end_page + 1).saturating_sub(self.start_page)
    }
}

/// How a document's sections were derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SegmentationMode {
    /// Sections come from the document outline
    #[default]
    Toc,
    /// One section per physical page
    Pages,
}

impl SegmentationMode {
    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            SegmentationMode::Toc => "TOC",
            SegmentationMode::Pages => "PAGES",
        }
    }

    /// Notice to show the user about comparison accuracy, if any.
    pub fn disclaimer(&self) -> Option<&'static str> {
        match self {
            SegmentationMode::Toc => None,
            SegmentationMode::Pages => Some(
                "No usable outline was found; sections are compared page by page, \
                 so content that moved between pages shows up as changes.",
            ),
        }
    }
}

impl std::fmt::Display for SegmentationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sections extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSections {
    /// How sections were derived
    pub mode: SegmentationMode,

    /// Total number of pages in the document
    pub page_count: u32,

    /// Sections in final page order
    pub sections: Vec<ExtractedSection>,
}

impl DocumentSections {
    /// Find a section by exact title.
    pub fn get(&self, title: &str) -> Option<&ExtractedSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Titles in page order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.title.as_str())
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
