//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use iprs_chain::{ChainError, ChainRecord, ChainType, DagService, MemoryDag};
use iprs_core::{
    AcceptAllValidator, Context, NodeHash, Record, RecordType, TypeSet, Validator,
};
use iprs_store::{DatastoreStore, MemoryDatastore};

/// A chain type registered in a type set, plus an in-memory DAG.
pub struct TestFixture {
    pub chain: ChainType,
    pub types: Arc<TypeSet>,
    pub dag: Arc<MemoryDag>,
}

impl TestFixture {
    /// A fixture whose chain type accepts every record.
    pub fn new() -> Self {
        Self::with_validator(AcceptAllValidator)
    }

    pub fn with_validator(validator: impl Validator + 'static) -> Self {
        let chain = ChainType::new(validator);
        let types = Arc::new(TypeSet::from_types([
            Arc::new(chain.clone()) as Arc<dyn RecordType>
        ]));
        Self {
            chain,
            types,
            dag: Arc::new(MemoryDag::new()),
        }
    }

    /// A fresh in-memory store sharing this fixture's type set.
    pub fn memory_store(&self) -> DatastoreStore<MemoryDatastore> {
        DatastoreStore::new(MemoryDatastore::new(), Arc::clone(&self.types))
    }

    /// A chain record with no parents, wrapping nothing in particular.
    pub fn entry(&self, version: u64, value: &[u8]) -> ChainRecord {
        self.entry_with_validity(version, b"", value)
    }

    pub fn entry_with_validity(&self, version: u64, validity: &[u8], value: &[u8]) -> ChainRecord {
        self.chain
            .builder()
            .version(version)
            .validity(validity.to_vec())
            .value(value.to_vec())
            .record(NodeHash::ZERO)
            .build()
            .unwrap_or_else(|e| panic!("fixture record failed to build: {}", e))
    }

    /// Store a record's node in the DAG.
    pub async fn add(&self, record: &dyn Record) -> Result<NodeHash, ChainError> {
        self.dag.add(&Context::background(), record.node()).await
    }

    /// Build and store a linear chain of `len` records, oldest first. Each
    /// record links to the one before it.
    pub async fn linear_chain(&self, len: u64) -> Result<Vec<ChainRecord>, ChainError> {
        let mut records: Vec<ChainRecord> = Vec::new();
        let mut previous: Option<NodeHash> = None;

        for version in 1..=len {
            let mut builder = self
                .chain
                .builder()
                .version(version)
                .value(format!("entry {}", version).into_bytes())
                .record(NodeHash::ZERO);
            if let Some(parent) = previous {
                builder = builder.parent(parent);
            }
            let record = builder.build()?;
            previous = Some(self.add(&record).await?);
            records.push(record);
        }

        Ok(records)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
