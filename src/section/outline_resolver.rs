//! Turns a document outline into a flat, deduplicated, page-ordered
//! list of sections.

use std::collections::HashSet;

use crate::error::Error;
use crate::model::{total_nodes, Destination, OutlineNode, Section};
use crate::parser::DocumentHandle;

/// Outcome of resolving one outline node's destination.
#[derive(Debug)]
enum Resolution {
    /// 1-based page resolved from a real destination
    Resolved(u32),
    /// The node has no destination at all
    Estimated,
    /// The destination exists but could not be resolved
    Failed(Error),
}

fn resolve_node<H: DocumentHandle + ?Sized>(doc: &H, destination: Option<&Destination>) -> Resolution {
    let Some(destination) = destination else {
        return Resolution::Estimated;
    };

    match doc
        .resolve_destination(destination)
        .and_then(|target| doc.page_index(&target))
    {
        Ok(index) => Resolution::Resolved(index.saturating_add(1)),
        Err(e) => Resolution::Failed(e),
    }
}

/// Resolve the document's own outline.
///
/// Returns `None` when the document has no usable outline; the caller
/// then falls back to page segmentation.
pub fn resolve_outline<H: DocumentHandle + ?Sized>(doc: &H) -> Option<Vec<Section>> {
    let outline = doc.outline()?;
    log::debug!("Outline has {} entries", total_nodes(&outline));
    resolve_sections(doc, &outline, doc.page_count())
}

/// Resolve `nodes` into sections for a document of `page_count` pages.
///
/// Returns `None` if no node carries a non-empty title or the document
/// has no pages.
pub fn resolve_sections<H: DocumentHandle + ?Sized>(
    doc: &H,
    nodes: &[OutlineNode],
    page_count: u32,
) -> Option<Vec<Section>> {
    if page_count == 0 {
        return None;
    }

    let mut sections = Vec::new();
    collect_sections(doc, nodes, 0, &mut sections);
    if sections.is_empty() {
        return None;
    }

    let mut seen = HashSet::new();
    sections.retain(|s| seen.insert(s.title.clone()));

    place_sections(&mut sections, page_count);
    Some(sections)
}

/// Depth-first, pre-order walk emitting one section per titled node.
fn collect_sections<H: DocumentHandle + ?Sized>(
    doc: &H,
    nodes: &[OutlineNode],
    level: u32,
    out: &mut Vec<Section>,
) {
    for node in nodes {
        let title = node.title.trim();
        if !title.is_empty() {
            let placeholder = out.len() as u32 + 1;
            let section = match resolve_node(doc, node.destination.as_ref()) {
                Resolution::Resolved(page) => Section::new(title, page, level),
                Resolution::Estimated => Section::estimated(title, placeholder, level),
                Resolution::Failed(e) => {
                    log::warn!("Could not resolve destination of '{}': {}", title, e);
                    Section::estimated(title, placeholder, level)
                }
            };
            out.push(section);
        }

        collect_sections(doc, &node.children, level + 1, out);
    }
}

/// Assign estimated pages, order by start page and clamp to the document.
///
/// `sections` must be in discovery order; ties keep that order.
fn place_sections(sections: &mut [Section], page_count: u32) {
    let invalid_count = sections.iter().filter(|s| !s.has_valid_page).count() as u32;

    if invalid_count == sections.len() as u32 {
        let step = page_count.div_ceil(invalid_count);
        for (index, section) in sections.iter_mut().enumerate() {
            section.start_page = step.saturating_mul(index as u32).saturating_add(1);
        }
    } else if invalid_count > 0 {
        let step = page_count.div_ceil(invalid_count + 1);
        let invalid = sections.iter_mut().filter(|s| !s.has_valid_page);
        for (rank, section) in (1u32..).zip(invalid) {
            section.start_page = step.saturating_mul(rank);
        }
        sections.sort_by_key(|s| s.start_page);
    } else {
        sections.sort_by_key(|s| s.start_page);
    }

    for section in sections.iter_mut() {
        section.start_page = section.start_page.min(page_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageTarget;
    use crate::parser::MemoryDocument;

    fn doc(pages: usize) -> MemoryDocument {
        MemoryDocument::new((1..=pages).map(|i| format!("page {}", i)))
    }

    fn at(title: &str, index: u32) -> OutlineNode {
        OutlineNode::new(title, Some(Destination::page_index(index)))
    }

    fn pages_of(sections: &[Section]) -> Vec<(String, u32)> {
        sections
            .iter()
            .map(|s| (s.title.clone(), s.start_page))
            .collect()
    }

    #[test]
    fn test_resolved_sections_sorted() {
        let d = doc(10);
        let outline = vec![at("Fees", 6), at("Intro", 0), at("Rates", 2)];
        let sections = resolve_sections(&d, &outline, 10).unwrap();
        assert_eq!(
            pages_of(&sections),
            vec![
                ("Intro".to_string(), 1),
                ("Rates".to_string(), 3),
                ("Fees".to_string(), 7)
            ]
        );
        assert!(sections.iter().all(|s| s.has_valid_page));
    }

    #[test]
    fn test_levels_tracked() {
        let d = doc(5);
        let outline = vec![at("Part A", 0).with_child(at("A.1", 1).with_child(at("A.1.a", 2)))];
        let sections = resolve_sections(&d, &outline, 5).unwrap();
        let levels: Vec<u32> = sections.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![0, 1, 2]);
    }

    #[test]
    fn test_blank_titles_skipped_but_children_kept() {
        let d = doc(4);
        let outline = vec![OutlineNode::new("   ", None).with_child(at("  Child  ", 1))];
        let sections = resolve_sections(&d, &outline, 4).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Child");
        assert_eq!(sections[0].level, 1);
    }

    #[test]
    fn test_no_titles_is_not_usable() {
        let d = doc(3);
        assert!(resolve_sections(&d, &[], 3).is_none());
        assert!(resolve_sections(&d, &[OutlineNode::new("", None)], 3).is_none());
    }

    #[test]
    fn test_dedup_first_occurrence_wins() {
        let d = doc(10);
        let outline = vec![
            at("Coverage", 1),
            at("Exclusions", 4).with_child(at("Coverage", 8)),
        ];
        let sections = resolve_sections(&d, &outline, 10).unwrap();
        let coverage: Vec<_> = sections.iter().filter(|s| s.title == "Coverage").collect();
        assert_eq!(coverage.len(), 1);
        assert_eq!(coverage[0].level, 0);
        assert_eq!(coverage[0].start_page, 2);
    }

    #[test]
    fn test_estimation_spread() {
        let d = doc(20);
        let outline = vec![
            at("Intro", 0),
            OutlineNode::new("A", None),
            OutlineNode::new("B", None),
            OutlineNode::new("C", None),
            OutlineNode::new("D", None),
        ];
        let sections = resolve_sections(&d, &outline, 20).unwrap();
        let estimated: Vec<u32> = sections
            .iter()
            .filter(|s| !s.has_valid_page)
            .map(|s| s.start_page)
            .collect();
        assert_eq!(estimated, vec![4, 8, 12, 16]);
    }

    #[test]
    fn test_failed_destination_is_estimated() {
        let d = doc(6);
        let outline = vec![
            at("Intro", 0),
            OutlineNode::new("Lost", Some(Destination::named("nowhere"))),
            at("Out of range", 40),
        ];
        let sections = resolve_sections(&d, &outline, 6).unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections.iter().filter(|s| !s.has_valid_page).count(), 2);
        // ceil(6 / 3) * rank
        assert_eq!(
            pages_of(&sections),
            vec![
                ("Intro".to_string(), 1),
                ("Lost".to_string(), 2),
                ("Out of range".to_string(), 4)
            ]
        );
    }

    #[test]
    fn test_max_page_index_is_estimated() {
        let d = doc(2);
        let outline = vec![at("Intro", 0), at("Rates", u32::MAX)];
        let sections = resolve_sections(&d, &outline, 2).unwrap();
        assert_eq!(sections.len(), 2);
        assert!(!sections[1].has_valid_page);
        assert_eq!(sections[1].title, "Rates");
        assert!(sections.iter().all(|s| s.start_page <= 2));

        match d.page_index(&PageTarget::Index(u32::MAX)) {
            Err(Error::PageOutOfRange(page, count)) => {
                assert_eq!(page, u32::MAX);
                assert_eq!(count, 2);
            }
            other => panic!("expected out of range, got {:?}", other),
        }
    }

    #[test]
    fn test_all_unresolved() {
        let d = doc(10);
        let outline = vec![
            OutlineNode::new("A", None),
            OutlineNode::new("B", None),
            OutlineNode::new("C", None),
        ];
        let sections = resolve_sections(&d, &outline, 10).unwrap();
        // ceil(10 / 3) * index0 + 1
        let pages: Vec<u32> = sections.iter().map(|s| s.start_page).collect();
        assert_eq!(pages, vec![1, 5, 9]);
    }

    #[test]
    fn test_clamped_to_page_count() {
        let d = doc(2);
        let outline = vec![
            OutlineNode::new("A", None),
            OutlineNode::new("B", None),
            OutlineNode::new("C", None),
        ];
        let sections = resolve_sections(&d, &outline, 2).unwrap();
        let pages: Vec<u32> = sections.iter().map(|s| s.start_page).collect();
        assert_eq!(pages, vec![1, 2, 2]);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let d = doc(8);
        let outline = vec![at("Second", 3), at("First", 1), at("Also second", 3)];
        let sections = resolve_sections(&d, &outline, 8).unwrap();
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Also second"]);
    }

    #[test]
    fn test_idempotent() {
        let d = doc(20).with_named_destination("fees", 11);
        let outline = vec![
            at("Intro", 0),
            OutlineNode::new("Rates", None).with_child(at("Fees", 11)),
            OutlineNode::new("Fees by name", Some(Destination::named("fees"))),
            OutlineNode::new("Appendix", None),
        ];
        let first = resolve_sections(&d, &outline, 20);
        let second = resolve_sections(&d, &outline, 20);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_outline_uses_document() {
        let d = doc(3).with_outline(vec![at("Only", 2)]);
        let sections = resolve_outline(&d).unwrap();
        assert_eq!(pages_of(&sections), vec![("Only".to_string(), 3)]);

        assert!(resolve_outline(&doc(3)).is_none());
        assert!(resolve_outline(&doc(3).with_outline(vec![])).is_none());
    }
}
