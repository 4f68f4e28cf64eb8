//! # IPRS
//!
//! The InterPlanetary Record System: typed, versioned, self-describing
//! records wrapped around content-addressed nodes.
//!
//! ## Overview
//!
//! - **Records** carry a version, opaque validity data, and a value. Every
//!   record links to its type, so any holder can decode it through a
//!   [`TypeSet`].
//! - **Validators** decide whether a record is valid and break ties between
//!   records of equal version.
//! - **Ordering** is total and deterministic: version, then validator, then
//!   canonical bytes. Independent writers agree on the best record.
//! - **Stores** put records at a path and return the best one.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use iprs::{Context, Resolver, ResolverConfig, TypeSet};
//! use iprs::chain::ChainType;
//! use iprs::core::{NodeHash, RecordType};
//! use iprs::store::{DatastoreStore, Path, SqliteDatastore};
//!
//! async fn example() {
//!     let chain = ChainType::default();
//!     let types = Arc::new(TypeSet::from_types([Arc::new(chain.clone()) as Arc<dyn RecordType>]));
//!     let store = DatastoreStore::new(SqliteDatastore::open("records.db").unwrap(), types);
//!     let resolver = Resolver::new(store, ResolverConfig::default());
//!
//!     let ctx = Context::background();
//!     let path = Path::new("/names/alice");
//!     let record = chain.builder().version(1).value(b"hello".to_vec()).record(NodeHash::ZERO).build().unwrap();
//!
//!     resolver.publish(&ctx, &path, &record).await.unwrap();
//!     let best = resolver.resolve(&ctx, &path).await.unwrap();
//!     assert_eq!(best.value(), b"hello");
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `iprs::core` - Nodes, the record codec, TypeSet, ordering
//! - `iprs::chain` - Chain records and the DAG service
//! - `iprs::store` - Store abstraction, datastore backends

pub mod error;
pub mod resolver;

// Re-export component crates
pub use iprs_chain as chain;
pub use iprs_core as core;
pub use iprs_store as store;

pub use error::{ResolverError, Result};
pub use resolver::{Resolver, ResolverConfig};

// Re-export commonly used core types
pub use iprs_core::{
    check_valid, is_valid, marshal, order, order_records, select_best, unmarshal_from_set,
    unmarshal_type, Context, CoreError, Node, NodeHash, Record, RecordRef, RecordType, TypeSet,
    ValidationError, Validator,
};
