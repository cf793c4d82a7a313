//! Comparison options.

use serde::{Deserialize, Serialize};

use crate::parser::ExtractOptions;

/// What a comparison looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// Line diff of the full section text
    #[default]
    FullText,
    /// Only `key = value` lines, compared per key
    NumericOnly,
}

/// Options for comparing two documents.
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Comparison mode
    pub mode: CompareMode,

    /// Options for extracting each document
    pub extract: ExtractOptions,
}

impl CompareOptions {
    /// Create new comparison options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set comparison mode.
    pub fn with_mode(mut self, mode: CompareMode) -> Self {
        self.mode = mode;
        self
    }

    /// Compare `key = value` lines only.
    pub fn numeric_only(mut self) -> Self {
        self.mode = CompareMode::NumericOnly;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_options_builder() {
        let options = CompareOptions::new()
            .numeric_only()
            .with_extract_options(ExtractOptions::new().sequential());

        assert_eq!(options.mode, CompareMode::NumericOnly);
        assert!(!options.extract.parallel);
        assert_eq!(CompareOptions::default().mode, CompareMode::FullText);
    }
}
