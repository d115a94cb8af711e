// End-to-end prediction scenarios over an in-memory dictionary.

use std::cell::Cell;
use std::sync::Arc;

use morph_core::core::matcher::intersect;
use morph_core::core::splitter::splits;
use morph_core::core::types::{
    Pattern, PatternId, Rule, RuleForm, RuleFormId, RuleId, Stem, StemId, SuffixId,
};
use morph_core::persistence::{load_dictionary, save_to_disk, DictionarySnapshot};
use morph_core::store::RuleFormFilter;
use morph_core::{
    LexicalStore, Lexicon, MemoryStore, MorphError, Morphology, MorphologyConfig, PrefixOrder,
};

fn dictionary() -> MemoryStore {
    let mut b = MemoryStore::builder();
    b.prefix("НЕ").prefix("БЕЗ");

    b.suffix("");
    let oj = b.suffix("ОЙ");
    let a = b.suffix("А");
    let i = b.suffix("И");
    let li = b.suffix("ЛИ");
    let t = b.suffix("ТЬ");
    let soft = b.suffix("Ь");

    b.pattern(PatternId(1), "ADJ", "nom,sg,masc");
    b.pattern(PatternId(2), "NOUN", "nom,sg,masc");
    b.pattern(PatternId(3), "NOUN", "gen,sg,masc");
    b.pattern(PatternId(4), "VERB", "inf");
    b.pattern(PatternId(5), "VERB", "past,pl");
    b.pattern(PatternId(6), "NOUN", "nom,sg,femn");
    b.pattern(PatternId(7), "NOUN", "gen,sg,femn");
    b.pattern(PatternId(8), "NOUN", "nom,pl,femn");

    // большой
    b.rule(RuleId(10), 7);
    b.rule_form(RuleId(10), 1, None, PatternId(1));
    b.rule_form(RuleId(10), 2, Some(oj), PatternId(1));
    b.stem("БОЛЬШ", RuleId(10));

    // стол
    b.rule(RuleId(20), 3);
    b.rule_form(RuleId(20), 1, None, PatternId(2));
    b.rule_form(RuleId(20), 2, Some(a), PatternId(3));
    b.stem("СТОЛ", RuleId(20));

    // стать
    b.rule(RuleId(30), 5);
    b.rule_form(RuleId(30), 1, Some(t), PatternId(4));
    b.rule_form(RuleId(30), 2, Some(li), PatternId(5));
    b.stem("СТА", RuleId(30));

    // сталь
    b.rule(RuleId(40), 3);
    b.rule_form(RuleId(40), 1, Some(soft), PatternId(6));
    b.rule_form(RuleId(40), 2, Some(i), PatternId(7));
    b.rule_form(RuleId(40), 3, Some(i), PatternId(8));
    b.stem("СТАЛ", RuleId(40));

    b.build().unwrap()
}

fn morphology() -> Morphology<MemoryStore> {
    Morphology::new(dictionary())
}

#[test]
fn empty_input_yields_nothing() {
    let m = morphology();
    assert!(m.predict("").unwrap().is_empty());
    assert!(m.predict(" \t ").unwrap().is_empty());
}

#[test]
fn bolshoj_worked_scenario() {
    let found = morphology().predict("большой").unwrap();
    assert_eq!(found.len(), 1);
    let a = &found[0];
    assert_eq!(a.rule_form, RuleFormId::new(RuleId(10), 2));
    assert_eq!(a.pattern.pos, "ADJ");
    assert_eq!(a.pattern.grammemes, vec!["nom", "sg", "masc"]);
    assert_eq!(a.suffix, "ОЙ");
    assert_eq!(a.stem, "БОЛЬШ");
    assert_eq!(a.lemma, "БОЛЬШ");
}

#[test]
fn stored_lemma_reconstructs_itself() {
    let found = morphology().predict("Стол").unwrap();
    assert!(found.iter().any(|a| a.lemma == "СТОЛ" && a.rule_form.is_lemma()));

    let genitive = morphology().predict("стола").unwrap();
    assert_eq!(genitive.len(), 1);
    assert_eq!(genitive[0].stem, "СТОЛ");
    assert_eq!(genitive[0].lemma, "СТОЛ");
}

#[test]
fn lemma_uses_lemma_form_suffix() {
    let found = morphology().predict("стали").unwrap();
    let lemmas: Vec<&str> = found.iter().map(|a| a.lemma.as_str()).collect();
    assert_eq!(lemmas, vec!["СТАТЬ", "СТАЛЬ", "СТАЛЬ"]);
}

#[test]
fn ranks_by_frequency_with_reversed_ties() {
    let found = morphology().predict("стали").unwrap();
    let order: Vec<RuleFormId> = found.iter().map(|a| a.rule_form).collect();
    // Assembly order is (30,2), (40,2), (40,3); the two rule 40 forms tie.
    assert_eq!(
        order,
        vec![
            RuleFormId::new(RuleId(30), 2),
            RuleFormId::new(RuleId(40), 3),
            RuleFormId::new(RuleId(40), 2),
        ]
    );
}

#[test]
fn results_bounded_by_split_intersections() {
    let m = morphology();
    for word in ["большой", "стали", "стол", "стола", "небольшой", "кот", "ой", "и"] {
        let prepared = m.prepare(word);
        let bound: usize = splits(&prepared, m.store())
            .iter()
            .map(|split| intersect(split, m.store()).len())
            .sum();
        let found = m.predict(word).unwrap();
        assert!(found.len() <= bound, "{word}: {} > {bound}", found.len());
        for a in &found {
            assert!(prepared.starts_with(&a.stem), "{word}: stem {} not in {prepared}", a.stem);
        }
    }
}

#[test]
fn prefixes_strip_before_analysis() {
    let m = morphology();
    assert_eq!(m.prepare("НЕБОЛЬШОЙ"), "БОЛЬШОЙ");
    assert_eq!(m.prepare("небезбольшой"), "БОЛЬШОЙ");
    let found = m.predict("небольшой").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].lemma, "БОЛЬШ");
}

#[test]
fn prefix_order_is_configurable() {
    let mut b = MemoryStore::builder();
    b.prefix("ПО").prefix("ПОД");
    let store = Arc::new(b.build().unwrap());

    let by_store = Morphology::new(Arc::clone(&store));
    assert_eq!(by_store.prepare("поднять"), "ДНЯТЬ");

    let config = MorphologyConfig { prefix_order: PrefixOrder::LongestFirst, ..Default::default() };
    let longest = Morphology::with_config(store, config);
    assert_eq!(longest.prepare("поднять"), "НЯТЬ");
}

/// Resolves the one-letter ending "Й" and the stem "БОЛЬШО" to the same ids
/// as "ОЙ" and "БОЛЬШ", so two different splits reach one rule form.
struct Aliased(MemoryStore);

impl LexicalStore for Aliased {
    fn prefixes(&self) -> &[String] {
        self.0.prefixes()
    }
    fn find_stem(&self, reversed: &str) -> Option<StemId> {
        match reversed {
            "ОШЬЛОБ" => self.0.find_stem("ШЬЛОБ"),
            key => self.0.find_stem(key),
        }
    }
    fn find_suffix(&self, reversed: &str) -> Option<SuffixId> {
        match reversed {
            "Й" => self.0.find_suffix("ЙО"),
            key => self.0.find_suffix(key),
        }
    }
    fn suffix_text(&self, id: SuffixId) -> Option<String> {
        self.0.suffix_text(id)
    }
    fn stem(&self, id: StemId) -> Option<Stem> {
        self.0.stem(id)
    }
    fn rule(&self, id: RuleId) -> Option<Rule> {
        self.0.rule(id)
    }
    fn pattern(&self, id: PatternId) -> Option<Pattern> {
        self.0.pattern(id)
    }
    fn rule_form(&self, id: RuleFormId) -> Option<RuleForm> {
        self.0.rule_form(id)
    }
    fn rule_forms_where(&self, filter: RuleFormFilter) -> &[RuleFormId] {
        self.0.rule_forms_where(filter)
    }
}

#[test]
fn duplicate_forms_from_distinct_splits_are_kept() {
    let m = Morphology::new(Aliased(dictionary()));
    let found = m.predict("большой").unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|a| a.rule_form == RuleFormId::new(RuleId(10), 2)));
}

/// Counts how many rule-form ids the predictor pulls out of the store.
struct Counting {
    inner: MemoryStore,
    handed_out: Cell<usize>,
}

impl LexicalStore for Counting {
    fn prefixes(&self) -> &[String] {
        self.inner.prefixes()
    }
    fn find_stem(&self, reversed: &str) -> Option<StemId> {
        self.inner.find_stem(reversed)
    }
    fn find_suffix(&self, reversed: &str) -> Option<SuffixId> {
        self.inner.find_suffix(reversed)
    }
    fn suffix_text(&self, id: SuffixId) -> Option<String> {
        self.inner.suffix_text(id)
    }
    fn stem(&self, id: StemId) -> Option<Stem> {
        self.inner.stem(id)
    }
    fn rule(&self, id: RuleId) -> Option<Rule> {
        self.inner.rule(id)
    }
    fn pattern(&self, id: PatternId) -> Option<Pattern> {
        self.inner.pattern(id)
    }
    fn rule_form(&self, id: RuleFormId) -> Option<RuleForm> {
        self.inner.rule_form(id)
    }
    fn rule_forms_where(&self, filter: RuleFormFilter) -> &[RuleFormId] {
        let found = self.inner.rule_forms_where(filter);
        self.handed_out.set(self.handed_out.get() + found.len());
        found
    }
}

#[test]
fn common_empty_ending_does_not_scale_lookup_cost() {
    let mut b = MemoryStore::builder();
    b.pattern(PatternId(1), "NOUN", "nom,sg,masc");
    for rule in 1..=50_000 {
        b.rule(RuleId(rule), 1);
        b.rule_form(RuleId(rule), 1, None, PatternId(1));
    }
    b.stem("СТОЛ", RuleId(1));
    let m = Morphology::new(Counting { inner: b.build().unwrap(), handed_out: Cell::new(0) });

    let found = m.predict("стол").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].lemma, "СТОЛ");
    // Only the one form of rule 1 is read, not every empty-ending form.
    assert_eq!(m.store().handed_out.get(), 1);
}

#[test]
fn unknown_words_are_the_callers_concern() {
    let lexicon = Lexicon::new(morphology());
    assert!(lexicon.morphology().predict("кот").unwrap().is_empty());
    assert!(matches!(lexicon.analyze("кот"), Err(MorphError::UnknownWord { .. })));
    assert_eq!(lexicon.lemmas("стали").unwrap(), vec!["СТАТЬ", "СТАЛЬ"]);
}

#[test]
fn concurrent_predictions_share_one_store() {
    let m = morphology();
    let expected = m.predict("стали").unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| m.predict("стали").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn compiled_snapshot_predicts_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("dict.json");
    let snapshot = DictionarySnapshot::from_store(&dictionary());
    std::fs::write(&source, serde_json::to_vec(&snapshot).unwrap()).unwrap();

    let from_json = load_dictionary(&source).unwrap();
    let bin = dir.path().join("dict.bin");
    save_to_disk(&from_json, &bin).unwrap();

    let compiled = Morphology::from_file(&bin, MorphologyConfig::default()).unwrap();
    for word in ["большой", "стали", "стола", "небольшой"] {
        assert_eq!(compiled.predict(word).unwrap(), morphology().predict(word).unwrap());
    }
}
