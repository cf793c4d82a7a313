//! Numeric `key = value` comparison.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::model::NumericChange;

/// Value a key takes in a document that does not mention it.
pub const MISSING_VALUE: &str = "0";

fn number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?").unwrap())
}

/// All decimal numbers in `text`, with thousands separators removed.
///
/// # Example
///
/// ```
/// use secdiff::compare::extract_numbers;
///
/// assert_eq!(extract_numbers("from 1,250.50 to -3"), vec!["1250.50", "-3"]);
/// ```
pub fn extract_numbers(text: &str) -> Vec<String> {
    number_pattern()
        .find_iter(text)
        .map(|m| m.as_str().replace(',', ""))
        .collect()
}

/// The value as a single number without separators, or `None` when it is
/// anything other than exactly one number.
fn numeric_value(value: &str) -> Option<String> {
    let m = number_pattern().find(value)?;
    (m.start() == 0 && m.end() == value.len()).then(|| m.as_str().replace(',', ""))
}

/// Parse numeric `key = value` lines into a map.
///
/// Lines are split on the first `=` and both sides trimmed. Only lines with
/// a non-empty key and a value that is one number are kept; later
/// duplicates win.
pub fn parse_key_values(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((key.to_string(), numeric_value(value)?))
        })
        .collect()
}

/// Keys whose values differ between `old_text` and `new_text`.
///
/// A key missing on one side takes the value `"0"` there, so keys that
/// appear or disappear are always reported. Output is sorted by key.
pub fn compare_numeric(old_text: &str, new_text: &str) -> Vec<NumericChange> {
    let old_map = parse_key_values(old_text);
    let new_map = parse_key_values(new_text);
    let keys: BTreeSet<&String> = old_map.keys().chain(new_map.keys()).collect();

    keys.into_iter()
        .filter_map(|key| {
            let old_value = old_map.get(key).map_or(MISSING_VALUE, String::as_str);
            let new_value = new_map.get(key).map_or(MISSING_VALUE, String::as_str);
            (old_value != new_value).then(|| NumericChange::new(key, old_value, new_value))
        })
        .collect()
}
