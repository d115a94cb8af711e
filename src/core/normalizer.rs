// File: src/core/normalizer.rs
use crate::config::PrefixOrder;

/// Trims surrounding whitespace and upper-cases the word.
pub fn normalize(word: &str) -> String {
    word.trim().to_uppercase()
}

/// Removes known prefixes from the front of `word` in a single pass.
///
/// Each prefix is tested against the word as already stripped by the
/// prefixes before it, so several prefixes can chain, but a prefix is only
/// tried once. With [`PrefixOrder::Store`] the result depends on the order
/// `prefixes` is given in.
pub fn strip_prefixes(word: &str, prefixes: &[String], order: PrefixOrder) -> String {
    let mut ordered: Vec<&str> = prefixes.iter().map(String::as_str).collect();
    if order == PrefixOrder::LongestFirst {
        ordered.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));
    }

    let mut clean_word = word;
    for prefix in ordered {
        if prefix.is_empty() {
            continue;
        }
        if let Some(rest) = clean_word.strip_prefix(prefix) {
            clean_word = rest;
        }
    }
    clean_word.to_string()
}
