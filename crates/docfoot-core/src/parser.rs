//! Colon-delimited key/value parsing
//!
//! Footer text such as
//!
//! ```text
//! Author: Jane
//! Version: 2.0
//! Page 1 of 3
//! ```
//!
//! yields `Author -> Jane` and `Version -> 2.0`; the last line has no colon
//! and is ignored.

use crate::types::MetadataMap;

/// Separator between key and value
pub const DELIMITER: char = ':';

/// Parse every `key: value` line of `text`.
///
/// Lines split on `\n` and, when they contain a colon, split at the first
/// colon only, so values may contain colons themselves (`Time: 10:30`). Both
/// sides are trimmed. Lines without a colon are skipped silently. When a key
/// repeats, the later line wins.
///
/// # Examples
///
/// ```rust
/// use docfoot_core::parse_key_values;
///
/// let map = parse_key_values("Ref: A: B\nno delimiter here");
/// assert_eq!(map.len(), 1);
/// assert_eq!(map["Ref"], "A: B");
/// ```
#[must_use = "returns the parsed key/value pairs"]
pub fn parse_key_values(text: &str) -> MetadataMap {
    let mut map = MetadataMap::new();
    for line in text.split('\n') {
        if let Some((key, value)) = line.split_once(DELIMITER) {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}
