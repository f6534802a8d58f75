//! Verse cache.
//!
//! Keys are canonical (see [`canonicalize`](super::selector::canonicalize))
//! before they reach this module. There is no eviction: the cache holds a
//! small amount of reference text for the life of the process.

use std::collections::HashMap;

/// Stored text for one canonical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Undecorated text. Banners are applied on read, never stored.
    pub text: String,

    /// Whether a write has changed this entry away from its fetched text.
    pub mutated: bool,
}

impl Entry {
    /// Entry created by a successful fetch.
    pub fn fetched(text: String) -> Self {
        Self {
            text,
            mutated: false,
        }
    }

    /// Entry created or replaced by an authorized write.
    pub fn mutated(text: String) -> Self {
        Self {
            text,
            mutated: true,
        }
    }
}

/// Map from canonical key to [`Entry`].
#[derive(Debug, Default)]
pub struct EntryCache {
    entries: HashMap<String, Entry>,
}

impl EntryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: String, entry: Entry) {
        self.entries.insert(key, entry);
    }

    /// Store fetched text unless a write already mutated the key.
    ///
    /// Returns the entry now held for `key`.
    pub fn populate(&mut self, key: String, text: String) -> &Entry {
        let slot = self
            .entries
            .entry(key)
            .or_insert_with(|| Entry::fetched(String::new()));
        if !slot.mutated {
            slot.text = text;
        }
        slot
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut cache = EntryCache::new();
        assert!(cache.get("john 3:16").is_none());

        cache.put("john 3:16".to_string(), Entry::fetched("For God so loved".into()));
        let entry = cache.get("john 3:16").unwrap();
        assert_eq!(entry.text, "For God so loved");
        assert!(!entry.mutated);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_populate_overwrites_fetched_text() {
        let mut cache = EntryCache::new();
        cache.populate("john 3:16".to_string(), "first".into());
        let entry = cache.populate("john 3:16".to_string(), "second".into());
        assert_eq!(entry.text, "second");
    }

    #[test]
    fn test_populate_keeps_mutated_entry() {
        let mut cache = EntryCache::new();
        cache.put("john 3:16".to_string(), Entry::mutated("changed".into()));

        let entry = cache.populate("john 3:16".to_string(), "fetched".into());
        assert_eq!(entry.text, "changed");
        assert!(entry.mutated);
    }
}
