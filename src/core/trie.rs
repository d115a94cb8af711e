// --- File: src/core/trie.rs
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct TrieNode {
    children: HashMap<u8, usize>,
    key_id: Option<usize>,
}

impl TrieNode {
    fn new() -> Self {
        Self { children: HashMap::new(), key_id: None }
    }
}

/// An exact-match byte trie that assigns each distinct key a dense id in
/// insertion order, and can map ids back to keys.
///
/// Stems and suffixes are inserted reversed, so walking from the root
/// follows a word from its last character backwards.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    keys: Vec<String>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::new()], keys: Vec::new() }
    }

    /// Inserts `key`, returning its id. Re-inserting a key returns the id it
    /// already has. O(k) where k is the key length in bytes.
    pub fn insert(&mut self, key: &str) -> usize {
        let mut node_idx = 0;
        for &byte in key.as_bytes() {
            let next_idx = if let Some(&id) = self.nodes[node_idx].children.get(&byte) {
                id
            } else {
                let new_node_id = self.nodes.len();
                self.nodes.push(TrieNode::new());
                self.nodes[node_idx].children.insert(byte, new_node_id);
                new_node_id
            };
            node_idx = next_idx;
        }

        if let Some(id) = self.nodes[node_idx].key_id {
            return id;
        }
        let id = self.keys.len();
        self.keys.push(key.to_string());
        self.nodes[node_idx].key_id = Some(id);
        id
    }

    /// Looks up the id of an exact key.
    pub fn find(&self, key: &str) -> Option<usize> {
        let mut node_idx = 0;
        for &byte in key.as_bytes() {
            node_idx = *self.nodes[node_idx].children.get(&byte)?;
        }
        self.nodes[node_idx].key_id
    }

    /// Returns the key stored under `id`.
    pub fn retrieve(&self, id: usize) -> Option<&str> {
        self.keys.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates `(id, key)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.keys.iter().enumerate().map(|(id, key)| (id, key.as_str()))
    }
}
