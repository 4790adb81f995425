//! In-memory payload store

use super::PayloadStore;
use crate::types::{BinDiffError, ComparisonId, Payload, Side, StoredComparison};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Payload store backed by a map in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<ComparisonId, StoredComparison>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E>(_: E) -> BinDiffError {
    BinDiffError::Store("memory store lock poisoned".to_string())
}

impl PayloadStore for MemoryStore {
    fn load(&self, id: ComparisonId) -> Result<Option<StoredComparison>, BinDiffError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn save(
        &self,
        id: ComparisonId,
        side: Side,
        payload: Payload,
    ) -> Result<StoredComparison, BinDiffError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let record = records
            .entry(id)
            .or_insert_with(|| StoredComparison::new(id));
        record.set(side, payload);
        Ok(record.clone())
    }

    fn ids(&self) -> Result<Vec<ComparisonId>, BinDiffError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_id() {
        let store = MemoryStore::new();
        assert_eq!(store.load(1).unwrap(), None);
        assert!(store.ids().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_and_updates_record() {
        let store = MemoryStore::new();

        let record = store.save(7, Side::Left, Payload::new(vec![1, 2, 3])).unwrap();
        assert_eq!(record.id, 7);
        assert!(record.right.is_none());

        let record = store.save(7, Side::Right, Payload::new(vec![4])).unwrap();
        assert!(record.is_complete());

        let loaded = store.load(7).unwrap().expect("record exists");
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_ids_sorted() {
        let store = MemoryStore::new();
        for id in [30, 10, 20] {
            store.save(id, Side::Left, Payload::new(vec![0])).unwrap();
        }
        assert_eq!(store.ids().unwrap(), vec![10, 20, 30]);
    }
}
