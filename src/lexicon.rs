// File: src/lexicon.rs
use crate::core::engine::Morphology;
use crate::core::types::Analysis;
use crate::error::{MorphError, Result};
use crate::store::LexicalStore;

/// The caller-facing layer over [`Morphology`]: a word with no predicted
/// analysis is an error here, where the predictor itself just returns an
/// empty list.
pub struct Lexicon<S> {
    morphology: Morphology<S>,
}

impl<S: LexicalStore> Lexicon<S> {
    pub fn new(morphology: Morphology<S>) -> Self {
        Self { morphology }
    }

    pub fn morphology(&self) -> &Morphology<S> {
        &self.morphology
    }

    /// Ranked analyses of `word`, or [`MorphError::UnknownWord`].
    pub fn analyze(&self, word: &str) -> Result<Vec<Analysis>> {
        let analyses = self.morphology.predict(word)?;
        if analyses.is_empty() {
            log::debug!("no analysis for {:?}", word);
            return Err(MorphError::unknown_word(word.trim()));
        }
        Ok(analyses)
    }

    /// Distinct lemmas of `word`, in ranked order.
    pub fn lemmas(&self, word: &str) -> Result<Vec<String>> {
        let mut lemmas: Vec<String> = Vec::new();
        for analysis in self.analyze(word)? {
            if !lemmas.contains(&analysis.lemma) {
                lemmas.push(analysis.lemma);
            }
        }
        Ok(lemmas)
    }

    pub fn is_known(&self, word: &str) -> Result<bool> {
        Ok(!self.morphology.predict(word)?.is_empty())
    }
}
