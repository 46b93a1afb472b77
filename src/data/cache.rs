use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use super::loader::{load_slots, LoadError};
use super::model::SlotTable;

// ---------------------------------------------------------------------------
// Parse cache keyed by file content
// ---------------------------------------------------------------------------

/// Session-scoped cache of parsed tables, keyed by the sha256 of the file
/// bytes. Re-submitting identical content short-circuits the parse; failed
/// loads are never cached. Entries are immutable once inserted.
#[derive(Default)]
pub struct TableCache {
    entries: HashMap<String, Arc<SlotTable>>,
}

fn content_key(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

impl TableCache {
    /// Return the parsed table for `bytes`, loading it on a cache miss.
    pub fn get_or_load(&mut self, bytes: &[u8]) -> Result<Arc<SlotTable>, LoadError> {
        let key = content_key(bytes);
        if let Some(table) = self.entries.get(&key) {
            log::debug!("parse cache hit for {key}");
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_slots(bytes)?);
        self.entries.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
