//! Export row reconstruction from comparison results.

use crate::model::{DiffPart, ExportRow, NumericChange, SectionChanges, SectionComparison};

/// Pair a diff stream into before/after rows.
///
/// A removed part directly followed by an added part becomes one row with
/// both values. Any other removed or added part becomes a one-sided row.
/// Unchanged parts are skipped.
pub fn text_rows(title: &str, parts: &[DiffPart]) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    let mut pending_removed: Option<&str> = None;

    for part in parts {
        if part.removed {
            if let Some(old) = pending_removed.replace(part.value.as_str()) {
                rows.push(ExportRow::textual(title, old, ""));
            }
        } else if part.added {
            let old = pending_removed.take().unwrap_or("");
            rows.push(ExportRow::textual(title, old, part.value.as_str()));
        } else if let Some(old) = pending_removed.take() {
            rows.push(ExportRow::textual(title, old, ""));
        }
    }

    if let Some(old) = pending_removed {
        rows.push(ExportRow::textual(title, old, ""));
    }
    rows
}

/// One row per changed key.
pub fn numeric_rows(title: &str, changes: &[NumericChange]) -> Vec<ExportRow> {
    changes
        .iter()
        .map(|c| ExportRow::numeric(title, &c.category, &c.old_value, &c.new_value))
        .collect()
}

/// Rows for every compared section, in section order.
///
/// An empty result means there is nothing to export.
pub fn build_rows(comparisons: &[SectionComparison]) -> Vec<ExportRow> {
    comparisons
        .iter()
        .flat_map(|comparison| match &comparison.changes {
            SectionChanges::Text(parts) => text_rows(&comparison.title, parts),
            SectionChanges::Numeric(changes) => numeric_rows(&comparison.title, changes),
        })
        .collect()
}
