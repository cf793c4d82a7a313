//! Document access module.

mod backend;
mod memory;
mod options;
mod pdf_document;

pub use backend::{decode_pdf_text, DocumentHandle};
pub use memory::MemoryDocument;
pub use options::{ErrorMode, ExtractOptions};
pub use pdf_document::{DocumentInfo, PdfDocument};
