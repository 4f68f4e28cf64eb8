//! The Resolver: publish records to a store and resolve the best one.
//!
//! A store may deliver several candidates for a path over time. The resolver
//! validates each one with its type's validator, keeps the best under the
//! total record order, and stops when the store has nothing more to send or
//! the deadline passes.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use iprs_core::{check_valid, order_records, Context, CoreError, Record, RecordRef, ValidationError};
use iprs_store::{Path, Store};
use tracing::{debug, warn};

use crate::error::{ResolverError, Result};

/// Configuration for the Resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Whether to validate records before putting them.
    pub validate_on_publish: bool,
    /// Whether to drop candidates that fail validation while resolving.
    pub validate_on_resolve: bool,
    /// Upper bound on a single resolve, on top of the caller's deadline.
    pub resolve_timeout: Option<Duration>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            validate_on_publish: true,
            validate_on_resolve: true,
            resolve_timeout: None,
        }
    }
}

/// Publishes and resolves records over a [`Store`].
pub struct Resolver<S: Store> {
    store: Arc<S>,
    config: ResolverConfig,
}

impl<S: Store> Resolver<S> {
    pub fn new(store: S, config: ResolverConfig) -> Self {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// A resolver over a store that is also used elsewhere.
    pub fn with_shared_store(store: Arc<S>, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Put a record at a path, validating it first if configured to.
    pub async fn publish(&self, ctx: &Context, path: &Path, record: &dyn Record) -> Result<()> {
        if self.config.validate_on_publish {
            check_valid(record)?;
        }

        self.store.put(ctx, path, record).await?;
        debug!(%path, version = record.version(), "published record");
        Ok(())
    }

    /// Resolve the best record at a path.
    ///
    /// Candidates are drained from the store's channel until it closes. If
    /// the deadline passes after at least one valid candidate arrived, the
    /// best so far is returned; otherwise the result is
    /// [`ResolverError::Timeout`]. Cancellation always fails the resolve.
    pub async fn resolve(&self, ctx: &Context, path: &Path) -> Result<RecordRef> {
        let ctx = match self.config.resolve_timeout {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx.child(),
        };

        let mut candidates = self.store.get_chan(&ctx, path).await?;
        let mut best: Option<RecordRef> = None;
        let mut rejected: Option<ValidationError> = None;

        loop {
            tokio::select! {
                biased;
                next = candidates.recv() => match next {
                    Some(candidate) => {
                        if self.config.validate_on_resolve {
                            if let Err(err) = check_valid(candidate.as_ref()) {
                                warn!(%path, version = candidate.version(), error = %err, "dropping invalid candidate");
                                rejected = Some(err);
                                continue;
                            }
                        }
                        best = Some(match best.take() {
                            Some(current) if order_records(current.as_ref(), candidate.as_ref()) != Ordering::Less => current,
                            _ => candidate,
                        });
                    }
                    None => break,
                },
                err = ctx.done() => {
                    if best.is_none() || matches!(err, CoreError::Cancelled) {
                        return Err(err.into());
                    }
                    debug!(%path, "deadline reached, returning best candidate so far");
                    break;
                }
            }
        }

        match (best, rejected) {
            (Some(record), _) => Ok(record),
            (None, Some(err)) => Err(ResolverError::Invalid(err)),
            (None, None) => Err(ResolverError::NotFound(path.to_string())),
        }
    }
}
