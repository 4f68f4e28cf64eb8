//! Store implementation over a byte-oriented [`Datastore`].

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use iprs_core::{marshal, order_records, unmarshal_from_set, Context, Record, RecordRef, TypeSet};
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::path::Path;
use crate::traits::{Datastore, Store};

/// A [`Store`] keeping one record per path in a [`Datastore`].
///
/// Records are stored as their canonical bytes under [`Path::key`] and
/// decoded through the type set on read. `put` keeps whichever of the stored
/// and the new record orders higher, so `get` returns the best record ever
/// put regardless of arrival order.
///
/// `put` rejects records whose type is not in the type set. A `Timeout` or
/// `Cancelled` from `put` means nothing was written.
pub struct DatastoreStore<D> {
    datastore: D,
    types: Arc<TypeSet>,
    // serializes put's read-compare-write
    write_lock: Mutex<()>,
}

impl<D: Datastore> DatastoreStore<D> {
    pub fn new(datastore: D, types: Arc<TypeSet>) -> Self {
        Self {
            datastore,
            types,
            write_lock: Mutex::new(()),
        }
    }

    pub fn datastore(&self) -> &D {
        &self.datastore
    }

    pub fn types(&self) -> &Arc<TypeSet> {
        &self.types
    }

    async fn load(&self, path: &Path) -> Result<Option<RecordRef>> {
        match self.datastore.get(path.key()).await? {
            Some(bytes) => Ok(Some(unmarshal_from_set(&self.types, &bytes)?)),
            None => Ok(None),
        }
    }
}

impl<D> std::fmt::Debug for DatastoreStore<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatastoreStore")
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<D: Datastore> Store for DatastoreStore<D> {
    async fn put(&self, ctx: &Context, path: &Path, record: &dyn Record) -> Result<()> {
        // never store a record the type set cannot decode
        let bytes = marshal(record);
        unmarshal_from_set(&self.types, &bytes)?;

        let _guard = ctx
            .run(async { Ok::<_, StoreError>(self.write_lock.lock().await) })
            .await?;

        if let Some(existing) = ctx.run(self.load(path)).await? {
            if order_records(existing.as_ref(), record) != Ordering::Less {
                debug!(%path, version = record.version(), "kept stored record");
                return Ok(());
            }
        }

        // the write is not raced against the context; once started it lands
        if let Some(err) = ctx.err() {
            return Err(err.into());
        }
        self.datastore.put(path.key(), bytes).await?;
        debug!(%path, version = record.version(), "stored record");
        Ok(())
    }

    async fn get(&self, ctx: &Context, path: &Path) -> Result<RecordRef> {
        ctx.run(async {
            self.load(path)
                .await?
                .ok_or_else(|| StoreError::NotFound(path.to_string()))
        })
        .await
    }

    async fn get_chan(&self, ctx: &Context, path: &Path) -> Result<mpsc::Receiver<RecordRef>> {
        let record = self.get(ctx, path).await?;

        // one record, then the channel closes with the sender
        let (tx, rx) = mpsc::channel(1);
        if tx.try_send(record).is_err() {
            return Err(StoreError::Cancelled);
        }
        Ok(rx)
    }
}
