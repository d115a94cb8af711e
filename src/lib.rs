// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod lexicon;
pub mod persistence;
pub mod store;
pub use crate::config::{MorphologyConfig, PrefixOrder};
pub use crate::core::engine::Morphology;
pub use crate::core::types::{Analysis, Pattern, RuleFormId};
pub use crate::error::{MorphError, Result};
pub use crate::lexicon::Lexicon;
pub use crate::store::{LexicalStore, MemoryStore};
