//! # IPRS Store
//!
//! Storage abstraction for IPRS records. A [`Store`] puts records at a
//! [`Path`] and gets back the best one under the total record order.
//!
//! ## Key Types
//!
//! - [`Store`] - The async record-level interface
//! - [`DatastoreStore`] - Reference store over any [`Datastore`]
//! - [`MemoryDatastore`] - In-memory key/value backend for tests
//! - [`SqliteDatastore`] - SQLite-based persistent backend
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use iprs_core::{Context, TypeSet};
//! use iprs_store::{DatastoreStore, Path, SqliteDatastore, Store};
//!
//! async fn example() {
//!     let types = Arc::new(TypeSet::new());
//!     let store = DatastoreStore::new(SqliteDatastore::open("records.db").unwrap(), types);
//!
//!     let ctx = Context::background();
//!     // let record: &dyn Record = ...;
//!     // store.put(&ctx, &Path::new("/names/alice"), record).await.unwrap();
//!     let best = store.get(&ctx, &Path::new("/names/alice")).await;
//! }
//! ```

pub mod datastore;
pub mod error;
pub mod memory;
pub mod migration;
pub mod path;
pub mod sqlite;
pub mod traits;

pub use datastore::DatastoreStore;
pub use error::{Result, StoreError};
pub use memory::MemoryDatastore;
pub use path::Path;
pub use sqlite::SqliteDatastore;
pub use traits::{Datastore, Store};
