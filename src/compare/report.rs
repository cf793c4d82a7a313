//! Serializable comparison report.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::export::{to_json, JsonFormat};
use crate::model::{DocumentSections, SectionComparison, SegmentationMode};

use super::options::CompareMode;

/// Summary of one compared document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// File name shown to the user
    pub name: String,

    /// How sections were derived
    pub mode: SegmentationMode,

    /// Total number of pages
    pub page_count: u32,

    /// Number of sections
    pub section_count: usize,
}

impl DocumentSummary {
    /// Summarize extracted sections under a display name.
    pub fn new(name: impl Into<String>, sections: &DocumentSections) -> Self {
        Self {
            name: name.into(),
            mode: sections.mode,
            page_count: sections.page_count,
            section_count: sections.len(),
        }
    }

    /// Summarize sections loaded from `path`, named by its file name.
    pub fn from_path(path: &Path, sections: &DocumentSections) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, sections)
    }
}

/// Result of comparing two documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// When the comparison ran
    pub generated_at: DateTime<Utc>,

    /// Comparison mode
    pub mode: CompareMode,

    /// Old document
    pub old: DocumentSummary,

    /// New document
    pub new: DocumentSummary,

    /// Changed sections, in title order
    pub sections: Vec<SectionComparison>,
}

impl ComparisonReport {
    /// Build a report timestamped now.
    pub fn new(
        old: DocumentSummary,
        new: DocumentSummary,
        mode: CompareMode,
        sections: Vec<SectionComparison>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            mode,
            old,
            new,
            sections,
        }
    }

    /// Check if any section changed.
    pub fn has_changes(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Total number of changed parts or keys across all sections.
    pub fn change_count(&self) -> usize {
        self.sections.iter().map(|s| s.changes.change_count()).sum()
    }

    /// Accuracy notices for documents compared page by page.
    pub fn disclaimers(&self) -> Vec<String> {
        [&self.old, &self.new]
            .into_iter()
            .filter_map(|doc| {
                doc.mode
                    .disclaimer()
                    .map(|notice| format!("{}: {}", doc.name, notice))
            })
            .collect()
    }

    /// Serialize the report as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }
}
