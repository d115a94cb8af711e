// File: src/store.rs
//! The read-only dictionary consumed by the predictor.

use crate::core::trie::Trie;
use crate::core::types::{
    Pattern, PatternId, Rule, RuleForm, RuleFormId, RuleId, Stem, StemId, SuffixId,
};
use crate::error::{MorphError, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Equality filter over the rule-form table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormFilter {
    /// Forms belonging to a rule.
    Rule(RuleId),
    /// Forms with exactly this ending. `Suffix(None)` selects the forms whose
    /// ending is empty, not every form.
    Suffix(Option<SuffixId>),
}

/// Lookups the predictor needs from a dictionary.
///
/// Stem and suffix keys are the *reversed* text of the stem or suffix.
/// Implementations shared between threads must tolerate concurrent reads.
pub trait LexicalStore {
    /// Known prefixes, in the order they should be tried.
    fn prefixes(&self) -> &[String];
    fn find_stem(&self, reversed: &str) -> Option<StemId>;
    fn find_suffix(&self, reversed: &str) -> Option<SuffixId>;
    /// The suffix text for `id`, in reading order.
    fn suffix_text(&self, id: SuffixId) -> Option<String>;
    fn stem(&self, id: StemId) -> Option<Stem>;
    fn rule(&self, id: RuleId) -> Option<Rule>;
    fn pattern(&self, id: PatternId) -> Option<Pattern>;
    fn rule_form(&self, id: RuleFormId) -> Option<RuleForm>;
    fn rule_forms_where(&self, filter: RuleFormFilter) -> &[RuleFormId];
}

impl<S: LexicalStore + ?Sized> LexicalStore for &S {
    fn prefixes(&self) -> &[String] {
        (**self).prefixes()
    }
    fn find_stem(&self, reversed: &str) -> Option<StemId> {
        (**self).find_stem(reversed)
    }
    fn find_suffix(&self, reversed: &str) -> Option<SuffixId> {
        (**self).find_suffix(reversed)
    }
    fn suffix_text(&self, id: SuffixId) -> Option<String> {
        (**self).suffix_text(id)
    }
    fn stem(&self, id: StemId) -> Option<Stem> {
        (**self).stem(id)
    }
    fn rule(&self, id: RuleId) -> Option<Rule> {
        (**self).rule(id)
    }
    fn pattern(&self, id: PatternId) -> Option<Pattern> {
        (**self).pattern(id)
    }
    fn rule_form(&self, id: RuleFormId) -> Option<RuleForm> {
        (**self).rule_form(id)
    }
    fn rule_forms_where(&self, filter: RuleFormFilter) -> &[RuleFormId] {
        (**self).rule_forms_where(filter)
    }
}

impl<S: LexicalStore + ?Sized> LexicalStore for Arc<S> {
    fn prefixes(&self) -> &[String] {
        (**self).prefixes()
    }
    fn find_stem(&self, reversed: &str) -> Option<StemId> {
        (**self).find_stem(reversed)
    }
    fn find_suffix(&self, reversed: &str) -> Option<SuffixId> {
        (**self).find_suffix(reversed)
    }
    fn suffix_text(&self, id: SuffixId) -> Option<String> {
        (**self).suffix_text(id)
    }
    fn stem(&self, id: StemId) -> Option<Stem> {
        (**self).stem(id)
    }
    fn rule(&self, id: RuleId) -> Option<Rule> {
        (**self).rule(id)
    }
    fn pattern(&self, id: PatternId) -> Option<Pattern> {
        (**self).pattern(id)
    }
    fn rule_form(&self, id: RuleFormId) -> Option<RuleForm> {
        (**self).rule_form(id)
    }
    fn rule_forms_where(&self, filter: RuleFormFilter) -> &[RuleFormId] {
        (**self).rule_forms_where(filter)
    }
}

pub(crate) fn reversed(text: &str) -> String {
    text.chars().rev().collect()
}

/// An immutable, fully validated in-memory dictionary.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    prefixes: Vec<String>,
    stem_trie: Trie,
    stems: Vec<Stem>,
    suffix_trie: Trie,
    rules: HashMap<RuleId, Rule>,
    patterns: HashMap<PatternId, Pattern>,
    rule_forms: BTreeMap<RuleFormId, RuleForm>,
    forms_by_rule: HashMap<RuleId, Vec<RuleFormId>>,
    forms_by_suffix: HashMap<Option<SuffixId>, Vec<RuleFormId>>,
}

impl MemoryStore {
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::new()
    }

    /// Stems in id order, as `(text, stem)`.
    pub fn stems(&self) -> impl Iterator<Item = (String, Stem)> + '_ {
        self.stem_trie
            .iter()
            .map(move |(id, key)| (reversed(key), self.stems[id]))
    }

    /// Suffixes in id order, in reading order.
    pub fn suffixes(&self) -> impl Iterator<Item = String> + '_ {
        self.suffix_trie.iter().map(|(_, key)| reversed(key))
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleId, Rule)> + '_ {
        let mut rules: Vec<_> = self.rules.iter().map(|(&id, &rule)| (id, rule)).collect();
        rules.sort_by_key(|&(id, _)| id);
        rules.into_iter()
    }

    pub fn patterns(&self) -> impl Iterator<Item = (PatternId, &Pattern)> + '_ {
        let mut patterns: Vec<_> = self.patterns.iter().map(|(&id, p)| (id, p)).collect();
        patterns.sort_by_key(|&(id, _)| id);
        patterns.into_iter()
    }

    pub fn rule_forms(&self) -> impl Iterator<Item = (RuleFormId, RuleForm)> + '_ {
        self.rule_forms.iter().map(|(&id, &form)| (id, form))
    }

    pub fn stem_count(&self) -> usize {
        self.stems.len()
    }

    pub fn suffix_count(&self) -> usize {
        self.suffix_trie.len()
    }

    pub fn rule_form_count(&self) -> usize {
        self.rule_forms.len()
    }
}

impl LexicalStore for MemoryStore {
    fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    fn find_stem(&self, reversed: &str) -> Option<StemId> {
        self.stem_trie.find(reversed).map(StemId)
    }

    fn find_suffix(&self, reversed: &str) -> Option<SuffixId> {
        self.suffix_trie.find(reversed).map(SuffixId)
    }

    fn suffix_text(&self, id: SuffixId) -> Option<String> {
        self.suffix_trie.retrieve(id.0).map(reversed)
    }

    fn stem(&self, id: StemId) -> Option<Stem> {
        self.stems.get(id.0).copied()
    }

    fn rule(&self, id: RuleId) -> Option<Rule> {
        self.rules.get(&id).copied()
    }

    fn pattern(&self, id: PatternId) -> Option<Pattern> {
        self.patterns.get(&id).cloned()
    }

    fn rule_form(&self, id: RuleFormId) -> Option<RuleForm> {
        self.rule_forms.get(&id).copied()
    }

    fn rule_forms_where(&self, filter: RuleFormFilter) -> &[RuleFormId] {
        let found = match filter {
            RuleFormFilter::Rule(rule) => self.forms_by_rule.get(&rule),
            RuleFormFilter::Suffix(suffix) => self.forms_by_suffix.get(&suffix),
        };
        found.map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Collects dictionary tables and validates them into a [`MemoryStore`].
#[derive(Debug, Default)]
pub struct MemoryStoreBuilder {
    prefixes: Vec<String>,
    stem_trie: Trie,
    stems: Vec<Stem>,
    suffix_trie: Trie,
    rules: HashMap<RuleId, Rule>,
    patterns: HashMap<PatternId, Pattern>,
    rule_forms: Vec<(RuleFormId, RuleForm)>,
    problems: Vec<String>,
}

impl MemoryStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a prefix. Prefixes are tried in the order they are added.
    pub fn prefix(&mut self, prefix: &str) -> &mut Self {
        let prefix = prefix.trim();
        if !prefix.is_empty() {
            self.prefixes.push(prefix.to_string());
        }
        self
    }

    /// Adds a suffix by its reading-order text.
    pub fn suffix(&mut self, text: &str) -> SuffixId {
        SuffixId(self.suffix_trie.insert(&reversed(text)))
    }

    /// Adds a stem by its reading-order text.
    pub fn stem(&mut self, text: &str, rule: RuleId) -> StemId {
        let id = self.stem_trie.insert(&reversed(text));
        if id < self.stems.len() {
            if self.stems[id].rule != rule {
                self.problems.push(format!(
                    "stem {:?} is bound to rule {} and rule {}",
                    text, self.stems[id].rule.0, rule.0
                ));
            }
        } else {
            self.stems.push(Stem { rule });
        }
        StemId(id)
    }

    pub fn rule(&mut self, id: RuleId, frequency: i64) -> &mut Self {
        if self.rules.insert(id, Rule { frequency }).is_some() {
            self.problems.push(format!("duplicate rule {}", id.0));
        }
        self
    }

    pub fn pattern(&mut self, id: PatternId, pos: &str, grammemes: &str) -> &mut Self {
        if self.patterns.insert(id, Pattern::parse(pos, grammemes)).is_some() {
            self.problems.push(format!("duplicate pattern {}", id.0));
        }
        self
    }

    pub fn rule_form(
        &mut self,
        rule: RuleId,
        index: u16,
        suffix: Option<SuffixId>,
        pattern: PatternId,
    ) -> RuleFormId {
        let id = RuleFormId::new(rule, index);
        self.rule_forms.push((id, RuleForm { rule, suffix, pattern }));
        id
    }

    /// Validates every cross-reference and freezes the tables.
    pub fn build(self) -> Result<MemoryStore> {
        let MemoryStoreBuilder {
            prefixes,
            stem_trie,
            stems,
            suffix_trie,
            rules,
            patterns,
            rule_forms: form_list,
            mut problems,
        } = self;

        for (key, stem) in stem_trie.iter().map(|(id, key)| (key, stems[id])) {
            if !rules.contains_key(&stem.rule) {
                problems.push(format!(
                    "stem {:?} references missing rule {}",
                    reversed(key),
                    stem.rule.0
                ));
            }
        }

        let mut rule_forms = BTreeMap::new();
        for (id, mut form) in form_list {
            if !rules.contains_key(&form.rule) {
                problems.push(format!("rule form {id} references missing rule {}", form.rule.0));
            }
            if !patterns.contains_key(&form.pattern) {
                problems.push(format!(
                    "rule form {id} references missing pattern {}",
                    form.pattern.0
                ));
            }
            if let Some(suffix) = form.suffix {
                match suffix_trie.retrieve(suffix.0) {
                    None => problems.push(format!(
                        "rule form {id} references missing suffix {}",
                        suffix.0
                    )),
                    // An empty suffix text is the empty ending.
                    Some("") => form.suffix = None,
                    Some(_) => {}
                }
            }
            if rule_forms.insert(id, form).is_some() {
                problems.push(format!("duplicate rule form {id}"));
            }
        }

        let mut referenced: Vec<RuleId> = rule_forms
            .values()
            .map(|f: &RuleForm| f.rule)
            .chain(stems.iter().map(|s| s.rule))
            .collect();
        referenced.sort();
        referenced.dedup();
        for rule in referenced {
            if rules.contains_key(&rule) && !rule_forms.contains_key(&RuleFormId::lemma_of(rule)) {
                problems.push(format!("rule {} has no lemma form", rule.0));
            }
        }

        if !problems.is_empty() {
            return Err(MorphError::integrity(problems.join("; ")));
        }

        let mut forms_by_rule: HashMap<RuleId, Vec<RuleFormId>> = HashMap::new();
        let mut forms_by_suffix: HashMap<Option<SuffixId>, Vec<RuleFormId>> = HashMap::new();
        for (&id, form) in &rule_forms {
            forms_by_rule.entry(form.rule).or_default().push(id);
            forms_by_suffix.entry(form.suffix).or_default().push(id);
        }

        Ok(MemoryStore {
            prefixes,
            stem_trie,
            stems,
            suffix_trie,
            rules,
            patterns,
            rule_forms,
            forms_by_rule,
            forms_by_suffix,
        })
    }
}
