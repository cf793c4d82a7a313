//! Section alignment between the old and new document.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::ExtractedSection;

/// The combined title set of two documents with a selection flag per title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSelection {
    selected: BTreeMap<String, bool>,
}

impl TitleSelection {
    /// All titles, sorted.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.selected.keys().map(String::as_str)
    }

    /// Titles whose flag is set, sorted.
    pub fn selected_titles(&self) -> impl Iterator<Item = &str> {
        self.selected
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(title, _)| title.as_str())
    }

    /// Whether a title is known and selected.
    pub fn is_selected(&self, title: &str) -> bool {
        self.selected.get(title).copied().unwrap_or(false)
    }

    /// Set the flag of a known title. Returns `false` for unknown titles.
    pub fn set(&mut self, title: &str, selected: bool) -> bool {
        match self.selected.get_mut(title) {
            Some(flag) => {
                *flag = selected;
                true
            }
            None => false,
        }
    }

    /// Set every flag.
    pub fn set_all(&mut self, selected: bool) {
        self.selected.values_mut().for_each(|flag| *flag = selected);
    }

    /// Number of titles.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if there are no titles.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Union of both title sets, sorted and deduplicated, all selected.
pub fn align_sections(
    old_sections: &[ExtractedSection],
    new_sections: &[ExtractedSection],
) -> TitleSelection {
    let titles: BTreeSet<&str> = old_sections
        .iter()
        .chain(new_sections)
        .map(|s| s.title.as_str())
        .collect();

    TitleSelection {
        selected: titles.into_iter().map(|t| (t.to_string(), true)).collect(),
    }
}
