// File: src/core/splitter.rs
use crate::core::types::{StemId, SuffixId};
use crate::store::LexicalStore;

/// A dictionary-known ending of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixCandidate {
    /// Length of the ending in characters.
    pub len: usize,
    /// `None` for the empty ending.
    pub id: Option<SuffixId>,
}

impl SuffixCandidate {
    pub const EMPTY: SuffixCandidate = SuffixCandidate { len: 0, id: None };
}

/// A candidate segmentation of a word whose stem resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub stem: StemId,
    pub suffix: SuffixCandidate,
}

/// Every dictionary-known ending of `word`, longest first, followed by the
/// empty ending. An empty word has no candidates at all.
pub fn possible_suffixes<S: LexicalStore + ?Sized>(word: &str, store: &S) -> Vec<SuffixCandidate> {
    if word.is_empty() {
        return vec![];
    }

    let mut endings = Vec::new();
    let mut slice = String::with_capacity(word.len());
    for (i, c) in word.chars().rev().enumerate() {
        slice.push(c);
        if let Some(id) = store.find_suffix(&slice) {
            endings.push(SuffixCandidate { len: i + 1, id: Some(id) });
        }
    }
    endings.reverse();
    endings.push(SuffixCandidate::EMPTY);
    endings
}

/// The stem key left over by `suffix`, in reading order.
///
/// The boundary is the inclusive end index `len(word) - len(suffix) - 1`,
/// the convention the dictionary was generated with. When the suffix covers
/// the whole word that index is `-1`, which the convention reads as "up to
/// the last character", so the whole word is used as the stem key. Keep
/// this exact arithmetic; existing dictionaries depend on it.
pub fn stem_key(word: &str, suffix: SuffixCandidate) -> &str {
    let char_count = word.chars().count();
    let stem_chars = if suffix.len >= char_count {
        char_count
    } else {
        char_count - suffix.len
    };
    match word.char_indices().nth(stem_chars) {
        Some((byte_idx, _)) => &word[..byte_idx],
        None => word,
    }
}

/// Looks up the stem left by `suffix`, if the dictionary knows it.
pub fn possible_stem<S: LexicalStore + ?Sized>(
    word: &str,
    suffix: SuffixCandidate,
    store: &S,
) -> Option<StemId> {
    let key: String = stem_key(word, suffix).chars().rev().collect();
    store.find_stem(&key)
}

/// Suffix candidates of `word` paired with their resolved stems. Candidates
/// whose stem is unknown are dropped.
pub fn splits<S: LexicalStore + ?Sized>(word: &str, store: &S) -> Vec<Split> {
    possible_suffixes(word, store)
        .into_iter()
        .filter_map(|suffix| {
            let stem = possible_stem(word, suffix, store);
            log::trace!("split {:?} at -{}: stem {:?}", word, suffix.len, stem);
            stem.map(|stem| Split { stem, suffix })
        })
        .collect()
}
