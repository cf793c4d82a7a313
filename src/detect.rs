//! Input validation for documents handed to the comparison engine.
//!
//! Files are checked here before any extraction task starts, so a rejected
//! file never consumes or invalidates the other side of a comparison.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header information read from an accepted PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3;
const HEADER_PROBE_LEN: usize = 16;

/// Validate that `path` names an existing PDF file.
///
/// Rejects absent files, directories, files without a `.pdf` extension and
/// files whose header is not a PDF header.
///
/// # Example
/// ```no_run
/// use secdiff::detect::validate_input;
///
/// let header = validate_input("rates-2024.pdf").unwrap();
/// println!("{}", header);
/// ```
pub fn validate_input<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let path = path.as_ref();
    let reject = |reason: &str| Error::InvalidInput {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if !path.exists() {
        return Err(reject("file does not exist"));
    }
    if !path.is_file() {
        return Err(reject("not a regular file"));
    }
    let has_pdf_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if !has_pdf_extension {
        return Err(reject("expected a .pdf file"));
    }

    let mut header = Vec::with_capacity(HEADER_PROBE_LEN);
    File::open(path)?
        .take(HEADER_PROBE_LEN as u64)
        .read_to_end(&mut header)?;

    read_header(&header).map_err(|e| reject(&e.to_string()))
}

/// Read the PDF header from the first bytes of a file.
pub fn read_header(data: &[u8]) -> Result<PdfHeader> {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    match version_bytes {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(PdfHeader { version })
        }
        _ => Err(Error::UnsupportedVersion(version)),
    }
}
