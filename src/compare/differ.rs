//! Line diff between section texts.
//!
//! Uses the `similar` crate (Myers diff algorithm) over whitespace-collapsed
//! line keys, so lines that differ only in whitespace compare equal.

use similar::{capture_diff_slices, Algorithm, DiffTag};

use crate::model::{DiffPart, DocumentSections, SectionChanges, SectionComparison};
use crate::normalize::line_key;

use super::aligner::TitleSelection;
use super::numeric::compare_numeric;
use super::options::CompareMode;

/// Compute a line diff of two texts, both trimmed first.
///
/// Adjacent lines of the same kind are merged into one [`DiffPart`]. A
/// replaced block yields its removed part followed by its added part.
pub fn diff_lines(old_text: &str, new_text: &str) -> Vec<DiffPart> {
    let old_lines: Vec<&str> = old_text.trim().lines().collect();
    let new_lines: Vec<&str> = new_text.trim().lines().collect();
    let old_keys: Vec<String> = old_lines.iter().map(|l| line_key(l)).collect();
    let new_keys: Vec<String> = new_lines.iter().map(|l| line_key(l)).collect();

    let mut parts = PartBuilder::default();
    for op in capture_diff_slices(Algorithm::Myers, &old_keys, &new_keys) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => parts.push(Kind::Unchanged, &old_lines[old_range]),
            DiffTag::Delete => parts.push(Kind::Removed, &old_lines[old_range]),
            DiffTag::Insert => parts.push(Kind::Added, &new_lines[new_range]),
            DiffTag::Replace => {
                parts.push(Kind::Removed, &old_lines[old_range]);
                parts.push(Kind::Added, &new_lines[new_range]);
            }
        }
    }
    parts.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Unchanged,
    Added,
    Removed,
}

/// Accumulates lines into parts, merging runs of the same kind.
#[derive(Default)]
struct PartBuilder {
    parts: Vec<(Kind, Vec<String>)>,
}

impl PartBuilder {
    fn push(&mut self, kind: Kind, lines: &[&str]) {
        if lines.is_empty() {
            return;
        }
        let lines = lines.iter().map(|l| l.to_string());
        match self.parts.last_mut() {
            Some((last, buffer)) if *last == kind => buffer.extend(lines),
            _ => self.parts.push((kind, lines.collect())),
        }
    }

    fn finish(self) -> Vec<DiffPart> {
        self.parts
            .into_iter()
            .map(|(kind, lines)| {
                let value = lines.join("\n");
                match kind {
                    Kind::Unchanged => DiffPart::unchanged(value),
                    Kind::Added => DiffPart::added(value),
                    Kind::Removed => DiffPart::removed(value),
                }
            })
            .collect()
    }
}

/// Compare one section's old and new text.
///
/// Returns `None` when nothing changed.
pub fn compare_section(
    title: &str,
    old_text: &str,
    new_text: &str,
    mode: CompareMode,
) -> Option<SectionComparison> {
    let changes = match mode {
        CompareMode::FullText => SectionChanges::Text(diff_lines(old_text, new_text)),
        CompareMode::NumericOnly => SectionChanges::Numeric(compare_numeric(old_text, new_text)),
    };

    changes.has_changes().then(|| SectionComparison {
        title: title.to_string(),
        changes,
    })
}

/// Compare every selected title, in title order.
///
/// A title missing from one document compares against empty text.
pub fn compare_sections(
    old: &DocumentSections,
    new: &DocumentSections,
    selection: &TitleSelection,
    mode: CompareMode,
) -> Vec<SectionComparison> {
    selection
        .selected_titles()
        .filter_map(|title| {
            let old_text = old.get(title).map_or("", |s| s.text.as_str());
            let new_text = new.get(title).map_or("", |s| s.text.as_str());
            compare_section(title, old_text, new_text, mode)
        })
        .collect()
}
