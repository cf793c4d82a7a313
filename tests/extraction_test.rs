//! Integration tests for segmentation and section text extraction.

use secdiff::parser::{DocumentHandle, ExtractOptions, MemoryDocument};
use secdiff::section::{extract_sections, resolve_outline, section_ranges, segment};
use secdiff::{segment_document, Destination, Error, OutlineNode, SegmentationMode};

fn pages(count: usize) -> MemoryDocument {
    MemoryDocument::new((1..=count).map(|n| format!("text of page {}", n)))
}

fn at(title: &str, index: u32) -> OutlineNode {
    OutlineNode::new(title, Some(Destination::page_index(index)))
}

/// Every page in 1..=P must be covered by exactly one section range.
fn assert_full_coverage(ranges: &[(u32, u32)], page_count: u32) {
    let mut covered = vec![0u32; page_count as usize];
    for &(start, end) in ranges {
        for page in start..=end {
            if (1..=page_count).contains(&page) {
                covered[(page - 1) as usize] += 1;
            }
        }
    }
    assert!(
        covered.iter().all(|&c| c == 1),
        "coverage {:?} for ranges {:?}",
        covered,
        ranges
    );
}

#[test]
fn test_fallback_trigger() {
    let doc = MemoryDocument::new(vec!["a", "b", "c"]).with_outline(vec![]);
    let result = segment_document(&doc, &ExtractOptions::default()).unwrap();

    assert_eq!(result.mode, SegmentationMode::Pages);
    assert_eq!(result.titles().collect::<Vec<_>>(), vec!["Page 1", "Page 2", "Page 3"]);
    assert_eq!(result.get("Page 2").unwrap().text, "b");
    assert!(result.mode.disclaimer().is_some());
}

#[test]
fn test_missing_outline_same_as_empty() {
    let without = MemoryDocument::new(vec!["a", "b"]);
    let empty = MemoryDocument::new(vec!["a", "b"]).with_outline(vec![]);
    assert_eq!(segment(&without), segment(&empty));
}

#[test]
fn test_outline_without_titles_falls_back() {
    let doc = pages(2).with_outline(vec![OutlineNode::new("  ", Some(Destination::page_index(0)))]);
    let (mode, sections) = segment(&doc);
    assert_eq!(mode, SegmentationMode::Pages);
    assert_eq!(sections.len(), 2);
}

#[test]
fn test_toc_extraction_with_leading_pages() {
    let doc = pages(6).with_outline(vec![at("Rates", 2), at("Fees", 4)]);
    let result = segment_document(&doc, &ExtractOptions::default()).unwrap();

    assert_eq!(result.mode, SegmentationMode::Toc);
    let rates = result.get("Rates").unwrap();
    assert_eq!((rates.start_page, rates.end_page), (1, 4));
    assert_eq!(
        rates.text,
        "text of page 1 text of page 2 text of page 3 text of page 4"
    );

    let fees = result.get("Fees").unwrap();
    assert_eq!((fees.start_page, fees.end_page), (5, 6));
    assert_eq!(fees.page_span(), 2);
}

#[test]
fn test_coverage_with_shared_start_pages() {
    let doc = pages(12).with_outline(vec![
        at("Intro", 0),
        OutlineNode::new("Summary", None),
        at("Rates", 4).with_child(at("Rates A", 4)).with_child(at("Rates B", 7)),
        OutlineNode::new("Appendix", Some(Destination::named("missing"))),
    ]);

    let (mode, sections) = segment(&doc);
    assert_eq!(mode, SegmentationMode::Toc);
    assert!(sections.windows(2).all(|w| w[0].start_page <= w[1].start_page));
    assert_full_coverage(&section_ranges(&sections, 12), 12);
}

#[test]
fn test_named_destinations() {
    let doc = pages(5)
        .with_named_destination("sec.rates", 3)
        .with_outline(vec![
            at("Intro", 0),
            OutlineNode::new("Rates", Some(Destination::named("sec.rates"))),
        ]);

    let sections = resolve_outline(&doc).unwrap();
    assert_eq!(sections[1].title, "Rates");
    assert_eq!(sections[1].start_page, 4);
    assert!(sections[1].has_valid_page);
}

#[test]
fn test_estimation_spread() {
    let doc = pages(20).with_outline(vec![
        at("Start", 0),
        OutlineNode::new("U1", None),
        OutlineNode::new("U2", None),
        OutlineNode::new("U3", None),
        OutlineNode::new("U4", None),
    ]);

    let sections = resolve_outline(&doc).unwrap();
    let estimated: Vec<u32> = sections
        .iter()
        .filter(|s| !s.has_valid_page)
        .map(|s| s.start_page)
        .collect();
    assert_eq!(estimated, vec![4, 8, 12, 16]);
}

#[test]
fn test_resolver_is_idempotent() {
    let doc = pages(9).with_outline(vec![
        OutlineNode::new("B", None),
        at("A", 5),
        OutlineNode::new("C", Some(Destination::named("nowhere"))),
        at("D", 2),
    ]);
    assert_eq!(resolve_outline(&doc), resolve_outline(&doc));
}

#[test]
fn test_dedup_keeps_first_level() {
    let doc = pages(10).with_outline(vec![
        at("Coverage", 1),
        at("Terms", 3).with_child(at("Coverage", 6)),
    ]);
    let sections = resolve_outline(&doc).unwrap();
    let coverage: Vec<_> = sections.iter().filter(|s| s.title == "Coverage").collect();
    assert_eq!(coverage.len(), 1);
    assert_eq!(coverage[0].level, 0);
}

#[test]
fn test_pages_fetched_once() {
    let doc = pages(4).with_outline(vec![at("A", 0), at("B", 1), at("C", 1), at("D", 3)]);
    let (_, sections) = segment(&doc);
    extract_sections(&doc, &sections, &ExtractOptions::default()).unwrap();

    for page in 1..=doc.page_count() {
        assert_eq!(doc.fetch_count(page), 1, "page {} fetched more than once", page);
    }
}

#[test]
fn test_unreadable_page_lenient_and_strict() {
    let doc = pages(3).with_unreadable_page(2);

    let lenient = segment_document(&doc, &ExtractOptions::default()).unwrap();
    assert_eq!(lenient.get("Page 2").unwrap().text, "");
    assert_eq!(lenient.get("Page 3").unwrap().text, "text of page 3");

    let strict = segment_document(&doc, &ExtractOptions::new().strict());
    assert!(matches!(strict, Err(Error::TextExtract(_))));
}

#[test]
fn test_normalization_applied() {
    let doc = MemoryDocument::new(vec!["ﬁnal rate = 10   \r\nnext"]);
    let normalized = segment_document(&doc, &ExtractOptions::default()).unwrap();
    assert_eq!(normalized.sections[0].text, "final rate = 10\nnext");

    let raw = segment_document(&doc, &ExtractOptions::new().with_normalization(false)).unwrap();
    assert!(raw.sections[0].text.starts_with('ﬁ'));
}
