// File: src/persistence.rs
use crate::core::types::{PatternId, RuleId, SuffixId};
use crate::error::{MorphError, Result};
use crate::store::{LexicalStore, MemoryStore};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The on-disk form of a dictionary, as produced by the dictionary build.
///
/// Stems and suffixes are identified by their position in their list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionarySnapshot {
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
    pub stems: Vec<StemEntry>,
    pub rules: Vec<RuleEntry>,
    pub patterns: Vec<PatternEntry>,
    pub rule_forms: Vec<RuleFormEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StemEntry {
    pub text: String,
    pub rule: RuleId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub id: RuleId,
    #[serde(deserialize_with = "frequency_from_any")]
    pub frequency: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub id: PatternId,
    pub pos: String,
    /// Comma separated grammeme tags.
    #[serde(default)]
    pub grammemes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFormEntry {
    pub rule: RuleId,
    pub index: u16,
    #[serde(default)]
    pub suffix: Option<usize>,
    pub pattern: PatternId,
}

/// Frequencies in JSON sources arrive as integers, fractional numbers or
/// decimal strings of either; fractions are truncated toward zero and
/// negative values are kept. Binary snapshots always hold the integer.
fn frequency_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    fn truncate<E: serde::de::Error>(value: f64) -> std::result::Result<i64, E> {
        if value.is_finite() {
            Ok(value.trunc() as i64)
        } else {
            Err(E::custom(format!("frequency {value} is not a finite number")))
        }
    }

    if !deserializer.is_human_readable() {
        return i64::deserialize(deserializer);
    }
    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Float(f) => truncate(f),
        Raw::Text(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(n) => Ok(n),
                Err(_) => {
                    let value = s.parse::<f64>().map_err(|_| {
                        <D::Error as serde::de::Error>::custom(format!("frequency {s:?} is not a number"))
                    })?;
                    truncate(value)
                }
            }
        }
    }
}

impl DictionarySnapshot {
    /// Validates the snapshot into a store.
    pub fn into_store(self) -> Result<MemoryStore> {
        let mut builder = MemoryStore::builder();
        for prefix in &self.prefixes {
            builder.prefix(prefix);
        }

        let mut suffix_ids = Vec::with_capacity(self.suffixes.len());
        for suffix in &self.suffixes {
            suffix_ids.push(builder.suffix(suffix));
        }
        for stem in &self.stems {
            builder.stem(&stem.text, stem.rule);
        }
        for rule in &self.rules {
            builder.rule(rule.id, rule.frequency);
        }
        for pattern in &self.patterns {
            builder.pattern(pattern.id, &pattern.pos, &pattern.grammemes);
        }
        for form in &self.rule_forms {
            let suffix = match form.suffix {
                None => None,
                Some(pos) => Some(*suffix_ids.get(pos).ok_or_else(|| {
                    MorphError::integrity(format!(
                        "rule form {}-{} references missing suffix {}",
                        form.rule.0, form.index, pos
                    ))
                })?),
            };
            builder.rule_form(form.rule, form.index, suffix, form.pattern);
        }
        builder.build()
    }

    /// Captures a store's tables.
    pub fn from_store(store: &MemoryStore) -> Self {
        Self {
            prefixes: store.prefixes().to_vec(),
            suffixes: store.suffixes().collect(),
            stems: store
                .stems()
                .map(|(text, stem)| StemEntry { text, rule: stem.rule })
                .collect(),
            rules: store
                .rules()
                .map(|(id, rule)| RuleEntry { id, frequency: rule.frequency })
                .collect(),
            patterns: store
                .patterns()
                .map(|(id, p)| PatternEntry {
                    id,
                    pos: p.pos.clone(),
                    grammemes: p.grammemes.join(","),
                })
                .collect(),
            rule_forms: store
                .rule_forms()
                .map(|(id, form)| RuleFormEntry {
                    rule: id.rule,
                    index: id.index,
                    suffix: form.suffix.map(|SuffixId(s)| s),
                    pattern: form.pattern,
                })
                .collect(),
        }
    }
}

/// Reads a JSON dictionary source.
pub fn load_snapshot_json(path: &Path) -> Result<MemoryStore> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: DictionarySnapshot = serde_json::from_reader(reader)?;
    log_loaded(path, &snapshot);
    snapshot.into_store()
}

/// Writes the store as a bincode snapshot, replacing `path` atomically.
pub fn save_to_disk(store: &MemoryStore, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let snapshot = DictionarySnapshot::from_store(store);
    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        bincode::serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| MorphError::Io(e.error))?;

    log::info!(
        "saved dictionary to {}: {} stems, {} suffixes, {} rule forms",
        path.display(),
        store.stem_count(),
        store.suffix_count(),
        store.rule_form_count()
    );
    Ok(())
}

/// Reads a bincode snapshot written by [`save_to_disk`].
pub fn load_from_disk(path: &Path) -> Result<MemoryStore> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: DictionarySnapshot = bincode::deserialize_from(reader)?;
    log_loaded(path, &snapshot);
    snapshot.into_store()
}

/// Loads `.json` files as JSON sources and anything else as a snapshot.
pub fn load_dictionary(path: &Path) -> Result<MemoryStore> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        load_snapshot_json(path)
    } else {
        load_from_disk(path)
    }
}

fn log_loaded(path: &Path, snapshot: &DictionarySnapshot) {
    log::info!(
        "loaded dictionary {}: {} stems, {} suffixes, {} rules, {} rule forms",
        path.display(),
        snapshot.stems.len(),
        snapshot.suffixes.len(),
        snapshot.rules.len(),
        snapshot.rule_forms.len()
    );
    if snapshot.prefixes.is_empty() {
        log::warn!("dictionary {} has no prefixes", path.display());
    }
    if snapshot.suffixes.is_empty() {
        log::warn!("dictionary {} has no suffixes", path.display());
    }
}
