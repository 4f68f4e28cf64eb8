//! Chain records: records that link to their parent records and to an
//! underlying record of any type.
//!
//! A chain record node carries, besides `@type` and `value`:
//!
//! - exactly one `record` link, to the record this entry wraps;
//! - zero or more `parent` links, to earlier chain records, in the order the
//!   writer gave them.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use iprs_core::coding::{node_has_required_links, node_type, LINK_TYPE, LINK_VALUE};
use iprs_core::{
    type_node, unmarshal_node_from_set, AcceptAllValidator, Context, CoreError, Link, Node,
    NodeHash, Record, RecordPayload, RecordRef, RecordType, TypeSet, Validator,
};
use tracing::trace;

use crate::dag::DagService;
use crate::error::Result;

/// Label of the chain type's identity node.
pub const CHAIN_TYPE_LABEL: &str = "iprs/chain";

/// Link to a parent chain record. May repeat.
pub const LINK_PARENT: &str = "parent";

/// Link to the wrapped record. Exactly one.
pub const LINK_RECORD: &str = "record";

const CHAIN_REQUIRED_LINKS: [&str; 3] = [LINK_TYPE, LINK_VALUE, LINK_RECORD];

/// The chain record type.
///
/// Cheap to clone; every record decoded through it holds a clone.
#[derive(Clone)]
pub struct ChainType {
    inner: Arc<ChainTypeInner>,
}

struct ChainTypeInner {
    node: Node,
    validator: Arc<dyn Validator>,
}

impl ChainType {
    /// A chain type using the given validator.
    pub fn new(validator: impl Validator + 'static) -> Self {
        Self::with_validator(Arc::new(validator))
    }

    /// A chain type sharing an existing validator.
    pub fn with_validator(validator: Arc<dyn Validator>) -> Self {
        Self {
            inner: Arc::new(ChainTypeInner {
                node: type_node(CHAIN_TYPE_LABEL),
                validator,
            }),
        }
    }

    /// Decode a chain record from its node.
    pub fn decode(&self, node: Node) -> std::result::Result<ChainRecord, CoreError> {
        node_has_required_links(&node, &CHAIN_REQUIRED_LINKS)?;

        let actual = node_type(&node)?;
        let expected = self.id();
        if actual != expected {
            return Err(CoreError::TypeMismatch { expected, actual });
        }

        let records = node.links_named(LINK_RECORD).count();
        if records != 1 {
            return Err(CoreError::Malformed(format!(
                "chain record has {} record links, expected 1",
                records
            )));
        }

        let record = node
            .link(LINK_RECORD)
            .map(|l| l.hash)
            .ok_or_else(|| CoreError::MissingLink(LINK_RECORD.to_string()))?;

        let payload = RecordPayload::decode(node.data())?;
        Ok(ChainRecord {
            record_type: self.clone(),
            payload,
            record,
            node,
        })
    }

    /// Start building a chain record of this type.
    pub fn builder(&self) -> ChainRecordBuilder {
        ChainRecordBuilder::new(self.clone())
    }
}

impl Default for ChainType {
    fn default() -> Self {
        Self::new(AcceptAllValidator)
    }
}

impl fmt::Debug for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChainType").field(&self.id()).finish()
    }
}

impl RecordType for ChainType {
    fn node(&self) -> &Node {
        &self.inner.node
    }

    fn validator(&self) -> &dyn Validator {
        self.inner.validator.as_ref()
    }

    fn new_record(&self, node: Node) -> std::result::Result<RecordRef, CoreError> {
        Ok(Arc::new(self.decode(node)?))
    }
}

/// A record in a chain.
#[derive(Debug, Clone)]
pub struct ChainRecord {
    record_type: ChainType,
    payload: RecordPayload,
    record: NodeHash,
    node: Node,
}

impl ChainRecord {
    /// Hashes of the parent records, in stored order.
    pub fn parent_hashes(&self) -> impl Iterator<Item = NodeHash> + '_ {
        self.node.links_named(LINK_PARENT).map(|l| l.hash)
    }

    /// Hash of the wrapped record.
    pub fn record_hash(&self) -> NodeHash {
        self.record
    }

    /// Resolve every parent through the DAG, in stored order.
    ///
    /// Either every parent resolves and decodes as a chain record, or the
    /// first failure is returned and no parents are.
    pub async fn parents(&self, ctx: &Context, dag: &dyn DagService) -> Result<Vec<ChainRecord>> {
        let mut parents = Vec::new();
        for hash in self.parent_hashes() {
            let node = ctx.run(dag.get(ctx, &hash)).await?;
            parents.push(self.record_type.decode(node)?);
            trace!(parent = %hash, "resolved parent");
        }
        Ok(parents)
    }

    /// Resolve the wrapped record, dispatching on its `@type` link.
    pub async fn record(&self, ctx: &Context, dag: &dyn DagService, types: &TypeSet) -> Result<RecordRef> {
        let node = ctx.run(dag.get(ctx, &self.record_hash())).await?;
        Ok(unmarshal_node_from_set(types, node)?)
    }
}

impl Record for ChainRecord {
    fn node(&self) -> &Node {
        &self.node
    }

    fn record_type(&self) -> &dyn RecordType {
        &self.record_type
    }

    fn version(&self) -> u64 {
        self.payload.version
    }

    fn validity(&self) -> &[u8] {
        &self.payload.validity
    }

    fn value(&self) -> &[u8] {
        &self.payload.value
    }
}

/// Builder for chain records.
pub struct ChainRecordBuilder {
    record_type: ChainType,
    version: u64,
    validity: Bytes,
    value: Bytes,
    parents: Vec<NodeHash>,
    record: Option<NodeHash>,
}

impl ChainRecordBuilder {
    /// Start building a record of the given chain type.
    pub fn new(record_type: ChainType) -> Self {
        Self {
            record_type,
            version: 0,
            validity: Bytes::new(),
            value: Bytes::new(),
            parents: Vec::new(),
            record: None,
        }
    }

    pub fn version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn validity(mut self, validity: impl Into<Bytes>) -> Self {
        self.validity = validity.into();
        self
    }

    pub fn value(mut self, value: impl Into<Bytes>) -> Self {
        self.value = value.into();
        self
    }

    /// Append a parent. Parents keep the order they are added in.
    pub fn parent(mut self, parent: NodeHash) -> Self {
        self.parents.push(parent);
        self
    }

    /// Set the wrapped record.
    pub fn record(mut self, record: NodeHash) -> Self {
        self.record = Some(record);
        self
    }

    /// Build the record. Fails when no wrapped record was set.
    pub fn build(self) -> std::result::Result<ChainRecord, CoreError> {
        let record = self
            .record
            .ok_or_else(|| CoreError::MissingLink(LINK_RECORD.to_string()))?;

        let mut links: Vec<Link> = self
            .parents
            .into_iter()
            .map(|p| Link::new(LINK_PARENT, p))
            .collect();
        links.push(Link::new(LINK_RECORD, record));

        let payload = RecordPayload::new(self.version, self.validity, self.value);
        let node = payload.to_node(self.record_type.id(), links);
        Ok(ChainRecord {
            record_type: self.record_type,
            payload,
            record,
            node,
        })
    }
}
