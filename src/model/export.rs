//! Flat rows handed to the spreadsheet writer.

use serde::{Deserialize, Serialize};

/// Kind of difference an export row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifferenceType {
    Numeric,
    Textual,
}

impl DifferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceType::Numeric => "Numeric",
            DifferenceType::Textual => "Textual",
        }
    }
}

impl std::fmt::Display for DifferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column headers of an export, in order.
pub const EXPORT_COLUMNS: [&str; 5] = [
    "Section Title",
    "Category",
    "Old Value",
    "New Value",
    "Difference Type",
];

/// One exported before/after pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub section_title: String,

    /// Parsed key for numeric rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub old_value: String,
    pub new_value: String,
    pub difference_type: DifferenceType,
}

impl ExportRow {
    /// A textual before/after row.
    pub fn textual(
        section_title: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            section_title: section_title.into(),
            category: None,
            old_value: old_value.into(),
            new_value: new_value.into(),
            difference_type: DifferenceType::Textual,
        }
    }

    /// A numeric row for a single key.
    pub fn numeric(
        section_title: impl Into<String>,
        category: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            section_title: section_title.into(),
            category: Some(category.into()),
            old_value: old_value.into(),
            new_value: new_value.into(),
            difference_type: DifferenceType::Numeric,
        }
    }

    /// Cell values in [`EXPORT_COLUMNS`] order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.section_title.as_str(),
            self.category.as_deref().unwrap_or(""),
            self.old_value.as_str(),
            self.new_value.as_str(),
            self.difference_type.as_str(),
        ]
    }
}
