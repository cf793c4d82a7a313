//! Error types for secdiff library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for secdiff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or comparing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// An input file was rejected before extraction started.
    #[error("Invalid input file {}: {reason}", path.display())]
    InvalidInput { path: PathBuf, reason: String },

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// A whole document could not be decoded.
    #[error("Failed to read {}: {source}", path.display())]
    DocumentLoad {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// An outline destination could not be resolved to a page.
    #[error("Unresolvable destination: {0}")]
    Destination(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error writing an export artifact.
    #[error("Export error: {0}")]
    Export(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap a decode failure so the message names the offending file.
    pub fn document_load(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::DocumentLoad {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error is fatal to a whole document.
    pub fn is_document_fatal(&self) -> bool {
        !matches!(
            self,
            Error::Destination(_) | Error::TextExtract(_) | Error::PageOutOfRange(..)
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
