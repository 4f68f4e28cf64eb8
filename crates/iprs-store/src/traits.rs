//! Store and Datastore traits.
//!
//! [`Store`] is the record-level interface: put records at a path and get
//! the best one back. [`Datastore`] is the byte-level key/value backend the
//! reference store is built on.

use async_trait::async_trait;
use iprs_core::{Context, Record, RecordRef};
use tokio::sync::mpsc;

use crate::error::Result;
use crate::path::Path;

/// A record storage system, possibly networked.
///
/// Stores may enforce strict consistency, be eventually consistent, or be
/// best effort. Every operation takes a [`Context`]; an expired deadline is
/// reported as `Timeout` and cancellation as `Cancelled`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Add a record at a path. Several records may be put at the same path.
    async fn put(&self, ctx: &Context, path: &Path, record: &dyn Record) -> Result<()>;

    /// Retrieve the best record for a path, under the total record order.
    async fn get(&self, ctx: &Context, path: &Path) -> Result<RecordRef>;

    /// Records for a path, delivered as they arrive.
    ///
    /// Better records may follow earlier ones, so the caller decides when to
    /// stop listening. The channel closes when the store has nothing more to
    /// deliver; it cannot be restarted.
    async fn get_chan(&self, ctx: &Context, path: &Path) -> Result<mpsc::Receiver<RecordRef>>;
}

/// Byte-oriented key/value storage.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Store `value` at `key`, replacing any previous value.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// The value at `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Remove the value at `key`, returning whether one was present.
    async fn delete(&self, key: &str) -> Result<bool>;

    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
