//! In-memory implementation of the Datastore trait.
//!
//! This is primarily for testing. All data is lost when the datastore is
//! dropped.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::Datastore;

/// In-memory datastore. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryDatastore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryDatastore {
    /// Create a new empty in-memory datastore.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Datastore for MemoryDatastore {
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some())
    }
}
