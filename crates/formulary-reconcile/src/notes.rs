//! Per-key aggregation of facility notes.

use std::collections::BTreeMap;

use formulary_normalize::Normalizer;

use crate::facility::FacilityEntry;

/// Facility notes grouped by canonical key.
///
/// Every non-empty facility key is present, even when none of its rows
/// carried a note; presence is what the join tests. Notes keep row order and
/// duplicates, so this is a sequence per key rather than a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedNotes {
    groups: BTreeMap<String, Vec<String>>,
    separator: String,
    empty_key_rows: usize,
}

impl AggregatedNotes {
    /// Group entries by key. Rows whose key is empty are counted and skipped.
    pub fn from_entries(
        entries: &[FacilityEntry],
        normalizer: &Normalizer,
        separator: &str,
    ) -> Self {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut empty_key_rows = 0usize;
        for entry in entries {
            let key = normalizer.normalize_value(entry.generic_name.as_deref());
            if key.is_empty() {
                empty_key_rows += 1;
                continue;
            }
            let notes = groups.entry(key).or_default();
            if !entry.note.trim().is_empty() {
                notes.push(entry.note.clone());
            }
        }
        Self {
            groups,
            separator: separator.to_string(),
            empty_key_rows,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    /// Joined notes for a key; `None` when the key is not in the facility data.
    pub fn get(&self, key: &str) -> Option<String> {
        self.groups
            .get(key)
            .map(|notes| notes.join(&self.separator))
    }

    /// Number of distinct facility keys.
    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    /// Facility rows dropped because their key was empty.
    pub fn empty_key_rows(&self) -> usize {
        self.empty_key_rows
    }
}
