// File: src/config.rs
use serde::{Deserialize, Serialize};

/// Order in which known prefixes are tried against a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixOrder {
    /// The order the store lists them in.
    #[default]
    Store,
    /// Longest prefix first; equal lengths keep store order.
    LongestFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyConfig {
    pub strip_prefixes: bool,
    pub prefix_order: PrefixOrder,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        Self { strip_prefixes: true, prefix_order: PrefixOrder::Store }
    }
}
