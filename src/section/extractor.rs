//! Section text extraction.
//!
//! Each section spans from its start page up to the page before the next
//! section's start, or to the end of the document. Pages before the first
//! section's start are attributed to the first section, so every page of
//! the document lands in exactly one section.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{ExtractedSection, Section};
use crate::normalize::normalize_page_text;
use crate::parser::{DocumentHandle, ErrorMode, ExtractOptions};

/// Page range `(start, end)` covered by each section, both inclusive.
///
/// `end < start` means the section is empty (the next section starts on
/// the same page).
pub fn section_ranges(sections: &[Section], page_count: u32) -> Vec<(u32, u32)> {
    sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let start = if i == 0 { 1 } else { section.start_page };
            let end = sections
                .get(i + 1)
                .map_or(page_count, |next| next.start_page.saturating_sub(1));
            (start, end)
        })
        .collect()
}

/// Read page text lazily, fetching each page at most once.
struct PageCache<'a, H: DocumentHandle + ?Sized> {
    doc: &'a H,
    options: &'a ExtractOptions,
    pages: HashMap<u32, Option<String>>,
}

impl<'a, H: DocumentHandle + ?Sized> PageCache<'a, H> {
    fn new(doc: &'a H, options: &'a ExtractOptions) -> Self {
        Self {
            doc,
            options,
            pages: HashMap::new(),
        }
    }

    fn get(&mut self, page_number: u32) -> Result<Option<&str>> {
        if !self.pages.contains_key(&page_number) {
            let text = match self.doc.page_text(page_number) {
                Ok(text) if self.options.normalize_text => Some(normalize_page_text(&text)),
                Ok(text) => Some(text),
                Err(e) if self.options.error_mode == ErrorMode::Strict => return Err(e),
                Err(e) => {
                    log::warn!("Skipping text of page {}: {}", page_number, e);
                    None
                }
            };
            self.pages.insert(page_number, text);
        }
        Ok(self.pages.get(&page_number).and_then(|t| t.as_deref()))
    }
}

/// Extract the text of every section, in input order.
pub fn extract_sections<H: DocumentHandle + ?Sized>(
    doc: &H,
    sections: &[Section],
    options: &ExtractOptions,
) -> Result<Vec<ExtractedSection>> {
    let page_count = doc.page_count();
    let mut cache = PageCache::new(doc, options);
    let mut extracted = Vec::with_capacity(sections.len());

    for (section, (start, end)) in sections.iter().zip(section_ranges(sections, page_count)) {
        let mut texts = Vec::new();
        for page_number in start..=end {
            if page_number < 1 || page_number > page_count {
                log::debug!(
                    "Section '{}' refers to page {} outside 1..={}",
                    section.title,
                    page_number,
                    page_count
                );
                continue;
            }
            if let Some(text) = cache.get(page_number)? {
                texts.push(text.to_string());
            }
        }

        extracted.push(ExtractedSection {
            title: section.title.clone(),
            text: texts.join(" "),
            start_page: start,
            end_page: end,
            level: section.level,
        });
    }

    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MemoryDocument;

    fn sections(starts: &[(&str, u32)]) -> Vec<Section> {
        starts
            .iter()
            .map(|(title, page)| Section::new(*title, *page, 0))
            .collect()
    }

    #[test]
    fn test_section_ranges() {
        let s = sections(&[("A", 1), ("B", 3), ("C", 3), ("D", 6)]);
        assert_eq!(
            section_ranges(&s, 8),
            vec![(1, 2), (3, 2), (3, 5), (6, 8)]
        );
    }

    #[test]
    fn test_leading_pages_go_to_first_section() {
        let s = sections(&[("A", 3), ("B", 5)]);
        assert_eq!(section_ranges(&s, 6), vec![(1, 4), (5, 6)]);
    }

    #[test]
    fn test_extract_concatenates_with_space() {
        let doc = MemoryDocument::new(vec!["one", "two", "three"]);
        let s = sections(&[("A", 1), ("B", 3)]);
        let extracted = extract_sections(&doc, &s, &ExtractOptions::default()).unwrap();
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].text, "one two");
        assert_eq!(extracted[1].text, "three");
        assert_eq!((extracted[1].start_page, extracted[1].end_page), (3, 3));
    }

    #[test]
    fn test_empty_span_has_empty_text() {
        let doc = MemoryDocument::new(vec!["one", "two"]);
        let s = sections(&[("A", 2), ("B", 2)]);
        let extracted = extract_sections(&doc, &s, &ExtractOptions::default()).unwrap();
        assert_eq!(extracted[0].text, "one");
        assert_eq!(extracted[1].text, "two");

        let s = sections(&[("A", 1), ("B", 2), ("C", 2)]);
        let extracted = extract_sections(&doc, &s, &ExtractOptions::default()).unwrap();
        assert_eq!(extracted[1].text, "");
        assert_eq!(extracted[2].text, "two");
    }

    #[test]
    fn test_pages_fetched_once() {
        let doc = MemoryDocument::new(vec!["1", "2", "3", "4"]);
        // Unsorted input overlaps ranges; the cache still reads each page once.
        let s = sections(&[("A", 1), ("B", 3), ("C", 2)]);
        extract_sections(&doc, &s, &ExtractOptions::default()).unwrap();
        for page in 1..=4 {
            assert_eq!(doc.fetch_count(page), 1, "page {}", page);
        }
    }

    #[test]
    fn test_out_of_range_pages_skipped() {
        let doc = MemoryDocument::new(vec!["one", "two"]);
        let s = sections(&[("A", 1), ("B", 9)]);
        let extracted = extract_sections(&doc, &s, &ExtractOptions::default()).unwrap();
        assert_eq!(extracted[0].text, "one two");
        assert_eq!(extracted[1].text, "");
    }

    #[test]
    fn test_unreadable_page_lenient() {
        let doc = MemoryDocument::new(vec!["one", "two", "three"]).with_unreadable_page(2);
        let s = sections(&[("A", 1)]);
        let extracted = extract_sections(&doc, &s, &ExtractOptions::default()).unwrap();
        assert_eq!(extracted[0].text, "one three");
    }

    #[test]
    fn test_unreadable_page_strict() {
        let doc = MemoryDocument::new(vec!["one", "two"]).with_unreadable_page(2);
        let s = sections(&[("A", 1)]);
        let result = extract_sections(&doc, &s, &ExtractOptions::new().strict());
        assert!(result.is_err());
    }

    #[test]
    fn test_normalization_toggle() {
        let doc = MemoryDocument::new(vec!["\u{FB01}le  "]);
        let s = sections(&[("A", 1)]);
        let normalized = extract_sections(&doc, &s, &ExtractOptions::default()).unwrap();
        assert_eq!(normalized[0].text, "file");

        let raw = extract_sections(&doc, &s, &ExtractOptions::new().with_normalization(false))
            .unwrap();
        assert_eq!(raw[0].text, "\u{FB01}le  ");
    }
}
