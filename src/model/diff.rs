//! Comparison result types.

use serde::{Deserialize, Serialize};

/// One run of lines in a line diff.
///
/// `added` and `removed` are never both set; both false means unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffPart {
    /// Lines joined by `\n`
    pub value: String,
    pub added: bool,
    pub removed: bool,
}

impl DiffPart {
    /// An unchanged run.
    pub fn unchanged(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            added: false,
            removed: false,
        }
    }

    /// A run present only in the new text.
    pub fn added(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            added: true,
            removed: false,
        }
    }

    /// A run present only in the old text.
    pub fn removed(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            added: false,
            removed: true,
        }
    }

    /// Whether this part is an addition or a removal.
    pub fn is_change(&self) -> bool {
        self.added || self.removed
    }
}

/// A key whose value differs between the two documents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NumericChange {
    /// The parsed key
    pub category: String,
    pub old_value: String,
    pub new_value: String,
}

impl NumericChange {
    pub fn new(
        category: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }
}

/// The changes found in one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionChanges {
    /// Line diff of the full section text
    #[serde(rename = "changes")]
    Text(Vec<DiffPart>),
    /// Changed `key = value` entries
    #[serde(rename = "numeric_changes")]
    Numeric(Vec<NumericChange>),
}

impl SectionChanges {
    /// Number of changed parts or keys.
    pub fn change_count(&self) -> usize {
        match self {
            SectionChanges::Text(parts) => parts.iter().filter(|p| p.is_change()).count(),
            SectionChanges::Numeric(changes) => changes.len(),
        }
    }

    /// Whether anything changed.
    pub fn has_changes(&self) -> bool {
        self.change_count() > 0
    }
}

/// Comparison result for one section title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionComparison {
    /// Section title shared by both documents
    pub title: String,

    #[serde(flatten)]
    pub changes: SectionChanges,
}
