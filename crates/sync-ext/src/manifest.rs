//! Manifest codec.
//!
//! The manifest is the serialized declared extension set: a JSON array of
//! id strings, written 2-space indented. The engine treats it as the
//! single source of truth for which extensions should be installed.

use std::collections::BTreeSet;

use crate::Result;

/// Parse manifest text into the declared id list.
pub fn parse(text: &str) -> Result<Vec<String>> {
    let ids: Vec<String> = serde_json::from_str(text)?;
    Ok(ids)
}

/// Parse manifest text into the declared set.
pub fn parse_set(text: &str) -> Result<BTreeSet<String>> {
    Ok(parse(text)?.into_iter().collect())
}

/// Serialize ids as the manifest text (sorted, 2-space indent).
///
/// The declared set is order-independent; sorting keeps uploads
/// deterministic and remote diffs stable.
pub fn serialize(ids: &[String]) -> String {
    let mut sorted: Vec<&str> = ids.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.dedup();
    serde_json::to_string_pretty(&sorted).expect("a string array always serializes")
}
