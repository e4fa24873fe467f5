//! Normalized table inventories extracted from report files

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One table as extracted from a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Display name exactly as it appeared in the report.
    pub name: String,
    /// Record count, when a numeric count was found on the line.
    ///
    /// `None` means "count unknown", which is distinct from a count of
    /// zero and is preserved through the whole pipeline.
    pub count: Option<u64>,
}

/// Normalize a display name into the join key used for matching entries
/// across two inventories: trimmed and lower-cased.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A deduplicated mapping from normalized table key to entry.
///
/// Insertion order is preserved so previews list tables in the order the
/// report did. When the same key occurs more than once, the first
/// occurrence wins and later lines are dropped silently - a deliberate
/// policy for reports that repeat a table in multiple sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    entries: IndexMap<String, InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under its normalized key.
    ///
    /// Returns `false` when the entry was dropped: either the name
    /// normalizes to an empty key, or the key is already present
    /// (first occurrence wins).
    pub fn insert(&mut self, name: impl Into<String>, count: Option<u64>) -> bool {
        let name = name.into();
        let key = normalize_key(&name);
        if key.is_empty() || self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, InventoryEntry { name, count });
        true
    }

    pub fn get(&self, key: &str) -> Option<&InventoryEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (key, entry) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &InventoryEntry)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}
