//! Document capability abstraction.
//!
//! Segmentation and text extraction only talk to documents through
//! [`DocumentHandle`], isolating the concrete PDF library (lopdf) from the
//! section logic.

use crate::error::Result;
use crate::model::{Destination, OutlineNode, PageTarget};

/// Read-only access to one decoded document.
///
/// Destination resolution is split in two steps: a destination is first
/// turned into an explicit [`PageTarget`], then the target is mapped to a
/// zero-based page index. Either step may fail for a single outline node
/// without affecting the rest of the document.
pub trait DocumentHandle {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Root outline nodes, or `None` if the document has no outline.
    fn outline(&self) -> Option<Vec<OutlineNode>>;

    /// Resolve a destination to an explicit page target.
    fn resolve_destination(&self, destination: &Destination) -> Result<PageTarget>;

    /// Map a page target to a zero-based page index.
    fn page_index(&self, target: &PageTarget) -> Result<u32>;

    /// Text of a page (1-indexed).
    fn page_text(&self, page_number: u32) -> Result<String>;
}

impl<T: DocumentHandle + ?Sized> DocumentHandle for &T {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn outline(&self) -> Option<Vec<OutlineNode>> {
        (**self).outline()
    }

    fn resolve_destination(&self, destination: &Destination) -> Result<PageTarget> {
        (**self).resolve_destination(destination)
    }

    fn page_index(&self, target: &PageTarget) -> Result<u32> {
        (**self).page_index(target)
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        (**self).page_text(page_number)
    }
}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8, or Latin-1).
pub fn decode_pdf_text(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
