// src/core/mod.rs

pub mod engine;
pub mod matcher;
pub mod normalizer;
pub mod ranking;
pub mod splitter;
pub mod trie;
pub mod types;
