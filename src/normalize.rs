//! Text normalization applied to page text and to diff comparison keys.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Normalize extracted page text.
///
/// Applies NFC, expands typographic ligatures, converts CRLF to LF and
/// strips trailing whitespace from every line.
pub fn normalize_page_text(text: &str) -> String {
    let mut result: String = text.nfc().collect();

    for (ligature, replacement) in LIGATURES {
        if result.contains(ligature) {
            result = result.replace(ligature, replacement);
        }
    }

    result
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comparison key for one line: whitespace runs collapsed, ends trimmed.
///
/// Two lines with equal keys differ at most in whitespace.
pub fn line_key(line: &str) -> String {
    whitespace_run().replace_all(line.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ligatures_expanded() {
        assert_eq!(normalize_page_text("\u{FB01}nal e\u{FB00}ect"), "final effect");
    }

    #[test]
    fn test_trailing_whitespace_and_crlf() {
        assert_eq!(normalize_page_text("a  \r\nb\t\rc"), "a\nb\nc");
    }

    #[test]
    fn test_nfc() {
        // e + combining acute accent
        assert_eq!(normalize_page_text("caf\u{0065}\u{0301}"), "caf\u{00E9}");
    }

    #[test]
    fn test_line_key() {
        assert_eq!(line_key("  rate   =\t10 "), "rate = 10");
        assert_eq!(line_key("rate = 10"), line_key("rate =  10"));
        assert_eq!(line_key("   "), "");
    }
}
