//! DAG service: resolves nodes by hash.

use std::collections::HashMap;

use async_trait::async_trait;
use iprs_core::{Context, Node, NodeHash};
use tokio::sync::RwLock;
use tracing::trace;

use crate::error::{ChainError, Result};

/// Resolves and stores content-addressed nodes.
///
/// Implementations should honor the context: return `Timeout` once its
/// deadline passes and `Cancelled` once it is cancelled.
#[async_trait]
pub trait DagService: Send + Sync {
    /// Fetch the node with the given hash.
    async fn get(&self, ctx: &Context, hash: &NodeHash) -> Result<Node>;

    /// Store a node, returning its hash.
    async fn add(&self, ctx: &Context, node: &Node) -> Result<NodeHash>;
}

/// In-memory DAG keyed by node hash.
#[derive(Debug, Default)]
pub struct MemoryDag {
    nodes: RwLock<HashMap<NodeHash, Node>>,
}

impl MemoryDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a node, returning it if it was present.
    pub async fn remove(&self, hash: &NodeHash) -> Option<Node> {
        self.nodes.write().await.remove(hash)
    }

    pub async fn contains(&self, hash: &NodeHash) -> bool {
        self.nodes.read().await.contains_key(hash)
    }

    pub async fn len(&self) -> usize {
        self.nodes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.nodes.read().await.is_empty()
    }
}

#[async_trait]
impl DagService for MemoryDag {
    async fn get(&self, ctx: &Context, hash: &NodeHash) -> Result<Node> {
        ctx.run(async {
            self.nodes
                .read()
                .await
                .get(hash)
                .cloned()
                .ok_or(ChainError::NodeNotFound(*hash))
        })
        .await
    }

    async fn add(&self, ctx: &Context, node: &Node) -> Result<NodeHash> {
        let hash = node.hash();
        ctx.run(async {
            self.nodes.write().await.insert(hash, node.clone());
            Ok::<_, ChainError>(())
        })
        .await?;
        trace!(node = %hash, "added node");
        Ok(hash)
    }
}
