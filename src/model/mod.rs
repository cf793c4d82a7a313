//! Data model shared by segmentation, comparison and export.
//!
//! Outline nodes come from a document, sections are derived from them,
//! and diff parts and export rows are produced fresh on every comparison.

mod diff;
mod export;
mod outline;
mod section;

pub use diff::{DiffPart, NumericChange, SectionChanges, SectionComparison};
pub use export::{DifferenceType, ExportRow, EXPORT_COLUMNS};
pub use outline::{total_nodes, Destination, OutlineNode, PageTarget};
pub use section::{DocumentSections, ExtractedSection, Section, SegmentationMode};
