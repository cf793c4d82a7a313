//! One section per physical page, used when no outline is usable.

use crate::model::Section;

/// Build `page_count` sections titled `"Page {n}"`.
pub fn page_sections(page_count: u32) -> Vec<Section> {
    (1..=page_count)
        .map(|n| Section::new(format!("Page {}", n), n, 0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_sections() {
        let sections = page_sections(3);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Page 1", "Page 2", "Page 3"]);
        assert!(sections.iter().all(|s| s.has_valid_page));
        assert_eq!(sections[2].start_page, 3);
    }

    #[test]
    fn test_empty_document() {
        assert!(page_sections(0).is_empty());
    }
}
