//! TypeSet: the registry of record types a decoder accepts.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::record::RecordType;
use crate::types::NodeHash;

/// A collection of record types, keyed by type identifier.
///
/// Reads share a read lock and may run concurrently; registration takes the
/// write lock. A TypeSet is an ordinary value: callers own it and pass it to
/// every decode that needs dispatch.
#[derive(Default)]
pub struct TypeSet {
    types: RwLock<HashMap<NodeHash, Arc<dyn RecordType>>>,
}

impl TypeSet {
    /// Create an empty type set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a type set holding the given types.
    pub fn from_types(types: impl IntoIterator<Item = Arc<dyn RecordType>>) -> Self {
        let map = types.into_iter().map(|t| (t.id(), t)).collect();
        Self {
            types: RwLock::new(map),
        }
    }

    /// The type registered at the given key, if any.
    pub fn get(&self, key: &NodeHash) -> Option<Arc<dyn RecordType>> {
        self.read().get(key).cloned()
    }

    /// Whether a type is registered at the given key.
    pub fn contains(&self, key: &NodeHash) -> bool {
        self.read().contains_key(key)
    }

    /// An independent snapshot of the registered types.
    pub fn types(&self) -> HashMap<NodeHash, Arc<dyn RecordType>> {
        self.read().clone()
    }

    /// Register a type under its identifier, returning any type it replaced.
    pub fn register(&self, record_type: Arc<dyn RecordType>) -> Option<Arc<dyn RecordType>> {
        let key = record_type.id();
        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, record_type)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // The map is only ever replaced entry-by-entry, so a poisoned lock still
    // guards a consistent map.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<NodeHash, Arc<dyn RecordType>>> {
        self.types.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for TypeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.read().keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::test_support::PlainType;

    #[test]
    fn test_absent_key() {
        let types = TypeSet::new();
        assert!(types.get(&NodeHash::from_bytes([9; 32])).is_none());
        assert!(types.is_empty());
    }

    #[test]
    fn test_register_and_lookup() {
        let types = TypeSet::new();
        let plain: Arc<dyn RecordType> = Arc::new(PlainType::new("iprs/plain"));
        let key = plain.id();

        assert!(types.register(plain.clone()).is_none());
        assert!(types.contains(&key));
        assert_eq!(types.get(&key).map(|t| t.id()), Some(key));
        assert_eq!(types.len(), 1);

        // re-registering the same identity replaces it
        assert!(types.register(plain).is_some());
        assert_eq!(types.len(), 1);
    }

    #[test]
    fn test_snapshot_isolated_from_later_registration() {
        let types = TypeSet::from_types([Arc::new(PlainType::new("iprs/a")) as Arc<dyn RecordType>]);
        let snapshot = types.types();

        let b: Arc<dyn RecordType> = Arc::new(PlainType::new("iprs/b"));
        let b_key = b.id();
        types.register(b);

        assert_eq!(snapshot.len(), 1);
        assert!(!snapshot.contains_key(&b_key));
        assert!(types.contains(&b_key));
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let types = Arc::new(TypeSet::new());
        let labels: Vec<String> = (0..8).map(|i| format!("iprs/t{}", i)).collect();

        let writer = {
            let types = Arc::clone(&types);
            let labels = labels.clone();
            thread::spawn(move || {
                for label in &labels {
                    types.register(Arc::new(PlainType::new(label)));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let types = Arc::clone(&types);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let snapshot = types.types();
                        assert!(snapshot.len() <= 8);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(types.len(), 8);
    }
}
