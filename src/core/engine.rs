use crate::config::MorphologyConfig;
use crate::core::matcher::match_rule_forms;
use crate::core::normalizer::{normalize, strip_prefixes};
use crate::core::ranking::rank;
use crate::core::splitter::splits;
use crate::core::types::{Analysis, RuleFormId, SuffixId};
use crate::error::{MorphError, Result};
use crate::persistence::load_dictionary;
use crate::store::{LexicalStore, MemoryStore};
use std::path::Path;

/// Predicts morphological analyses of single word forms from a read-only
/// dictionary.
///
/// The predictor holds no mutable state, so one instance can serve
/// concurrent callers as long as the store allows concurrent reads.
pub struct Morphology<S> {
    store: S,
    config: MorphologyConfig,
}

impl Morphology<MemoryStore> {
    /// Loads a dictionary (JSON source or bincode snapshot) from disk.
    pub fn from_file<P: AsRef<Path>>(path: P, config: MorphologyConfig) -> Result<Self> {
        Ok(Self::with_config(load_dictionary(path.as_ref())?, config))
    }
}

impl<S: LexicalStore> Morphology<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, MorphologyConfig::default())
    }

    pub fn with_config(store: S, config: MorphologyConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The word as the dictionary sees it: normalized, prefixes removed.
    pub fn prepare(&self, word: &str) -> String {
        let normal = normalize(word);
        if self.config.strip_prefixes {
            strip_prefixes(&normal, self.store.prefixes(), self.config.prefix_order)
        } else {
            normal
        }
    }

    /// Every analysis the dictionary supports for `word`, most frequent
    /// paradigm first.
    ///
    /// A word the dictionary does not cover yields `Ok` with an empty list.
    /// `Err` means the store itself is inconsistent.
    pub fn predict(&self, word: &str) -> Result<Vec<Analysis>> {
        let word = self.prepare(word);
        let splits = splits(&word, &self.store);
        let found = match_rule_forms(&splits, &self.store);
        log::debug!(
            "predict {:?}: {} split(s), {} matching form(s)",
            word,
            splits.len(),
            found.len()
        );

        let mut analyses = found
            .into_iter()
            .map(|id| self.assemble(&word, id))
            .collect::<Result<Vec<_>>>()?;
        rank(&mut analyses);
        Ok(analyses)
    }

    fn assemble(&self, word: &str, id: RuleFormId) -> Result<Analysis> {
        let form = self
            .store
            .rule_form(id)
            .ok_or_else(|| MorphError::integrity(format!("rule form {id} vanished")))?;
        let rule = self.store.rule(form.rule).ok_or_else(|| {
            MorphError::integrity(format!("rule form {id} references missing rule {}", form.rule.0))
        })?;
        let pattern = self.store.pattern(form.pattern).ok_or_else(|| {
            MorphError::integrity(format!(
                "rule form {id} references missing pattern {}",
                form.pattern.0
            ))
        })?;
        let suffix = self.suffix_text(id, form.suffix)?;

        // Taken from the word itself so the stem is always a substring of it.
        let stem = word.strip_suffix(suffix.as_str()).unwrap_or(word).to_string();

        let lemma_id = RuleFormId::lemma_of(form.rule);
        let lemma_form = self.store.rule_form(lemma_id).ok_or_else(|| {
            MorphError::integrity(format!("rule {} has no lemma form", form.rule.0))
        })?;
        let lemma = format!("{}{}", stem, self.suffix_text(lemma_id, lemma_form.suffix)?);

        Ok(Analysis { rule_form: id, rule, pattern, suffix, stem, lemma })
    }

    fn suffix_text(&self, id: RuleFormId, suffix: Option<SuffixId>) -> Result<String> {
        match suffix {
            None => Ok(String::new()),
            Some(suffix) => self.store.suffix_text(suffix).ok_or_else(|| {
                MorphError::integrity(format!("rule form {id} references missing suffix {}", suffix.0))
            }),
        }
    }
}
