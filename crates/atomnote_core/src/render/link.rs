//! Cross-reference token formatting and extraction.
//!
//! # Invariants
//! - Titles are wrapped verbatim; no case or whitespace normalization.
//! - Extraction returns targets in first-appearance order without duplicates.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Target is everything up to an optional `|alias` or `#heading` suffix.
static WIKI_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[([^\[\]|#]+)(?:[#|][^\[\]]*)?\]\]").expect("valid wiki link regex")
});

/// Wraps one title in the double-bracket cross-reference convention.
pub fn wiki_link(title: &str) -> String {
    format!("[[{title}]]")
}

/// Formats every title as a cross-reference and joins them in input order.
pub fn join_links<S: AsRef<str>>(titles: &[S], separator: &str) -> String {
    titles
        .iter()
        .map(|title| wiki_link(title.as_ref()))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Returns link targets embedded in free text.
pub fn extract_links(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    WIKI_LINK_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .filter(|target| seen.insert(target.clone()))
        .collect()
}
