//! Section alignment, differencing and export row reconstruction.
//!
//! The two documents' titles are merged into one sorted selection. Each
//! selected title is compared either as a line diff of its full text or as
//! a per-key comparison of its `key = value` lines. Sections without
//! changes are dropped from the results.
//!
//! # Example
//!
//! ```
//! use secdiff::compare::{align_sections, compare_sections, build_rows, CompareMode};
//! use secdiff::{DocumentSections, ExtractedSection, SegmentationMode};
//!
//! let old = DocumentSections {
//!     mode: SegmentationMode::Toc,
//!     page_count: 1,
//!     sections: vec![ExtractedSection::new("Rates", "rate = 10")],
//! };
//! let new = DocumentSections {
//!     sections: vec![ExtractedSection::new("Rates", "rate = 10\nfee = 5")],
//!     ..old.clone()
//! };
//!
//! let selection = align_sections(&old.sections, &new.sections);
//! let results = compare_sections(&old, &new, &selection, CompareMode::NumericOnly);
//! let rows = build_rows(&results);
//!
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].category.as_deref(), Some("fee"));
//! assert_eq!(rows[0].old_value, "0");
//! ```

mod aligner;
mod differ;
mod numeric;
mod options;
mod report;
mod rows;
mod session;

pub use aligner::{align_sections, TitleSelection};
pub use differ::{compare_section, compare_sections, diff_lines};
pub use numeric::{compare_numeric, extract_numbers, parse_key_values, MISSING_VALUE};
pub use options::{CompareMode, CompareOptions};
pub use report::{ComparisonReport, DocumentSummary};
pub use rows::{build_rows, numeric_rows, text_rows};
pub use session::ComparisonSession;
