// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stem key in the stem trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StemId(pub usize);

/// Identifier of a suffix key in the suffix trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuffixId(pub usize);

/// Identifier of an inflection rule (paradigm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub u32);

/// Identifier of a grammatical pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(pub u32);

/// The form index that always denotes the lemma (citation) form of a rule.
pub const LEMMA_FORM_INDEX: u16 = 1;

/// Composite key of one inflected form within a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleFormId {
    pub rule: RuleId,
    pub index: u16,
}

impl RuleFormId {
    pub fn new(rule: RuleId, index: u16) -> Self {
        Self { rule, index }
    }

    /// The lemma form of `rule`.
    pub fn lemma_of(rule: RuleId) -> Self {
        Self::new(rule, LEMMA_FORM_INDEX)
    }

    pub fn is_lemma(&self) -> bool {
        self.index == LEMMA_FORM_INDEX
    }
}

impl fmt::Display for RuleFormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.rule.0, self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stem {
    pub rule: RuleId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Corpus commonness of the paradigm. Not normalized across rules.
    pub frequency: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleForm {
    pub rule: RuleId,
    /// `None` for forms whose ending is empty.
    pub suffix: Option<SuffixId>,
    pub pattern: PatternId,
}

/// Part of speech plus grammatical feature tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub pos: String,
    pub grammemes: Vec<String>,
}

impl Pattern {
    /// Builds a pattern from a delimited grammeme field such as `"nom,sg,masc"`.
    pub fn parse(pos: &str, grammemes: &str) -> Self {
        Self {
            pos: pos.trim().to_string(),
            grammemes: grammemes
                .split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn has_grammeme(&self, grammeme: &str) -> bool {
        self.grammemes.iter().any(|g| g == grammeme)
    }
}

/// One predicted reading of a word. Built fresh for every `predict` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub rule_form: RuleFormId,
    pub rule: Rule,
    pub pattern: Pattern,
    pub suffix: String,
    /// Always a literal prefix of the (normalized, prefix-stripped) word.
    pub stem: String,
    pub lemma: String,
}
