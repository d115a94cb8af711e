// File: src/core/ranking.rs
use crate::core::types::Analysis;

/// Orders analyses by descending rule frequency.
///
/// This is a stable ascending sort followed by a reversal, so analyses with
/// equal frequency come out in the *reverse* of their assembly order.
pub fn rank(analyses: &mut [Analysis]) {
    analyses.sort_by_key(|a| a.rule.frequency);
    analyses.reverse();
}
