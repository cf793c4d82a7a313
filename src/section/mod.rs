//! Section segmentation and text extraction.
//!
//! A document is segmented from its outline when one is usable (TOC mode),
//! otherwise one section is produced per page (PAGES mode). The resulting
//! sections are then filled with page text.

mod extractor;
mod fallback;
mod outline_resolver;

pub use extractor::{extract_sections, section_ranges};
pub use fallback::page_sections;
pub use outline_resolver::{resolve_outline, resolve_sections};

use crate::error::Result;
use crate::model::{DocumentSections, Section, SegmentationMode};
use crate::parser::{DocumentHandle, ExtractOptions};

/// Derive the final section list and the mode it was derived with.
pub fn segment<H: DocumentHandle + ?Sized>(doc: &H) -> (SegmentationMode, Vec<Section>) {
    match resolve_outline(doc) {
        Some(sections) => (SegmentationMode::Toc, sections),
        None => (SegmentationMode::Pages, page_sections(doc.page_count())),
    }
}

/// Segment a document and extract the text of every section.
///
/// # Example
///
/// ```
/// use secdiff::parser::{ExtractOptions, MemoryDocument};
/// use secdiff::section::segment_document;
/// use secdiff::SegmentationMode;
///
/// let doc = MemoryDocument::new(vec!["rate = 10", "fee = 5"]);
/// let sections = segment_document(&doc, &ExtractOptions::default()).unwrap();
/// assert_eq!(sections.mode, SegmentationMode::Pages);
/// assert_eq!(sections.sections[1].title, "Page 2");
/// ```
pub fn segment_document<H: DocumentHandle + ?Sized>(
    doc: &H,
    options: &ExtractOptions,
) -> Result<DocumentSections> {
    let (mode, sections) = segment(doc);
    let page_count = doc.page_count();

    match mode {
        SegmentationMode::Toc => log::info!(
            "Segmented {} pages into {} outline sections",
            page_count,
            sections.len()
        ),
        SegmentationMode::Pages => log::info!(
            "No usable outline, comparing {} pages individually",
            page_count
        ),
    }

    let sections = extract_sections(doc, &sections, options)?;
    Ok(DocumentSections {
        mode,
        page_count,
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Destination, OutlineNode};
    use crate::parser::MemoryDocument;

    #[test]
    fn test_fallback_on_empty_outline() {
        let doc = MemoryDocument::new(vec!["a", "b", "c"]).with_outline(vec![]);
        let (mode, sections) = segment(&doc);
        assert_eq!(mode, SegmentationMode::Pages);
        assert_eq!(sections.len(), 3);
    }

    #[test]
    fn test_toc_mode() {
        let doc = MemoryDocument::new(vec!["intro", "rates", "more rates"]).with_outline(vec![
            OutlineNode::new("Intro", Some(Destination::page_index(0))),
            OutlineNode::new("Rates", Some(Destination::page_index(1))),
        ]);
        let result = segment_document(&doc, &ExtractOptions::default()).unwrap();
        assert_eq!(result.mode, SegmentationMode::Toc);
        assert_eq!(result.page_count, 3);
        assert_eq!(result.get("Rates").unwrap().text, "rates more rates");
    }

    #[test]
    fn test_empty_document() {
        let doc = MemoryDocument::new(Vec::<String>::new())
            .with_outline(vec![OutlineNode::new("Orphan", None)]);
        let result = segment_document(&doc, &ExtractOptions::default()).unwrap();
        assert_eq!(result.mode, SegmentationMode::Pages);
        assert!(result.is_empty());
    }
}
