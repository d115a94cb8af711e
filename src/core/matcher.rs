// File: src/core/matcher.rs
use crate::core::splitter::Split;
use crate::core::types::{RuleFormId, StemId, SuffixId};
use crate::store::{LexicalStore, RuleFormFilter};

/// Forms of the paradigm the stem belongs to. Empty when the stem or its
/// rule is not in the dictionary.
pub fn rule_forms_by_stem<S: LexicalStore + ?Sized>(stem_id: StemId, store: &S) -> &[RuleFormId] {
    let Some(stem) = store.stem(stem_id) else {
        return &[];
    };
    if store.rule(stem.rule).is_none() {
        return &[];
    }
    store.rule_forms_where(RuleFormFilter::Rule(stem.rule))
}

/// Forms carrying exactly this ending; `None` matches only empty endings.
pub fn rule_forms_by_suffix<S: LexicalStore + ?Sized>(
    suffix_id: Option<SuffixId>,
    store: &S,
) -> &[RuleFormId] {
    store.rule_forms_where(RuleFormFilter::Suffix(suffix_id))
}

/// Forms consistent with both halves of a split, in stem-form order.
///
/// Same set as `rule_forms_by_stem ∩ rule_forms_by_suffix`, computed by
/// checking each stem form's own ending, so the cost is bounded by the size
/// of the stem's paradigm rather than by how common the ending is.
pub fn intersect<S: LexicalStore + ?Sized>(split: &Split, store: &S) -> Vec<RuleFormId> {
    rule_forms_by_stem(split.stem, store)
        .iter()
        .copied()
        .filter(|&id| store.rule_form(id).map(|form| form.suffix) == Some(split.suffix.id))
        .collect()
}

/// Matches for every split, concatenated. A form reached through several
/// splits appears once per split.
pub fn match_rule_forms<S: LexicalStore + ?Sized>(splits: &[Split], store: &S) -> Vec<RuleFormId> {
    splits.iter().flat_map(|split| intersect(split, store)).collect()
}
