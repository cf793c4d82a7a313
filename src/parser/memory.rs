//! In-memory documents built from already extracted page text.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{Error, Result};
use crate::model::{Destination, OutlineNode, PageTarget};

use super::backend::DocumentHandle;

/// A document held entirely in memory.
///
/// Useful when page text comes from another extractor, and for exercising
/// segmentation without a PDF file.
///
/// # Example
///
/// ```
/// use secdiff::parser::{DocumentHandle, MemoryDocument};
///
/// let doc = MemoryDocument::new(vec!["page one", "page two"]);
/// assert_eq!(doc.page_count(), 2);
/// assert_eq!(doc.page_text(2).unwrap(), "page two");
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocument {
    pages: Vec<String>,
    outline: Option<Vec<OutlineNode>>,
    named: HashMap<String, u32>,
    unreadable: HashSet<u32>,
    fetches: Vec<AtomicU32>,
}

impl MemoryDocument {
    /// Create a document from page texts (page 1 first).
    pub fn new<S: Into<String>>(pages: impl IntoIterator<Item = S>) -> Self {
        let pages: Vec<String> = pages.into_iter().map(Into::into).collect();
        let fetches = pages.iter().map(|_| AtomicU32::new(0)).collect();
        Self {
            pages,
            fetches,
            ..Default::default()
        }
    }

    /// Attach an outline.
    pub fn with_outline(mut self, outline: Vec<OutlineNode>) -> Self {
        self.outline = Some(outline);
        self
    }

    /// Register a named destination pointing at a zero-based page index.
    pub fn with_named_destination(mut self, name: impl Into<String>, page_index: u32) -> Self {
        self.named.insert(name.into(), page_index);
        self
    }

    /// Make reading a page (1-indexed) fail.
    pub fn with_unreadable_page(mut self, page_number: u32) -> Self {
        self.unreadable.insert(page_number);
        self
    }

    /// How many times a page (1-indexed) has been read.
    pub fn fetch_count(&self, page_number: u32) -> u32 {
        page_number
            .checked_sub(1)
            .and_then(|i| self.fetches.get(i as usize))
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }
}

impl DocumentHandle for MemoryDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn outline(&self) -> Option<Vec<OutlineNode>> {
        self.outline.clone()
    }

    fn resolve_destination(&self, destination: &Destination) -> Result<PageTarget> {
        match destination {
            Destination::Explicit(target) => Ok(target.clone()),
            Destination::Named(name) => self
                .named
                .get(name)
                .map(|index| PageTarget::Index(*index))
                .ok_or_else(|| Error::Destination(format!("named destination '{}'", name))),
        }
    }

    fn page_index(&self, target: &PageTarget) -> Result<u32> {
        match target {
            PageTarget::Index(index) if *index < self.page_count() => Ok(*index),
            PageTarget::Index(index) => Err(Error::PageOutOfRange(
                index.saturating_add(1),
                self.page_count(),
            )),
            PageTarget::Reference(num, generation) => Err(Error::Destination(format!(
                "object {} {} R is not a page",
                num, generation
            ))),
        }
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        let index = page_number
            .checked_sub(1)
            .filter(|i| (*i as usize) < self.pages.len())
            .ok_or(Error::PageOutOfRange(page_number, self.page_count()))?;

        self.fetches[index as usize].fetch_add(1, Ordering::Relaxed);
        if self.unreadable.contains(&page_number) {
            return Err(Error::TextExtract(format!("Page {}: unreadable", page_number)));
        }
        Ok(self.pages[index as usize].clone())
    }
}
