//! Record payload: the versioned data carried in a record node.

use bytes::Bytes;

use crate::canonical::{decode_payload, encode_payload};
use crate::coding::{LINK_TYPE, LINK_VALUE};
use crate::error::CoreError;
use crate::node::{Link, Node};
use crate::types::NodeHash;

/// The `{version, validity, value}` triple stored as a record node's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPayload {
    /// Version number; higher versions always win ordering.
    pub version: u64,
    /// Opaque bytes consumed only by the record type's validator.
    pub validity: Bytes,
    /// Opaque application value.
    pub value: Bytes,
}

impl RecordPayload {
    /// Create a payload.
    pub fn new(version: u64, validity: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            version,
            validity: validity.into(),
            value: value.into(),
        }
    }

    /// Decode a payload from a node's data.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        decode_payload(bytes)
    }

    /// Canonical encoding of this payload.
    pub fn encode(&self) -> Vec<u8> {
        encode_payload(self)
    }

    /// The leaf node the `value` link points at.
    pub fn value_node(&self) -> Node {
        Node::leaf(self.value.clone())
    }

    /// Build a record node of the given type.
    ///
    /// The node carries the `@type` and `value` links plus any extra links a
    /// record type needs (chain records add `parent` and `record`).
    pub fn to_node(&self, type_id: NodeHash, extra_links: Vec<Link>) -> Node {
        let mut links = Vec::with_capacity(extra_links.len() + 2);
        links.push(Link::new(LINK_TYPE, type_id));
        links.push(Link::new(LINK_VALUE, self.value_node().hash()));
        links.extend(extra_links);
        Node::new(self.encode(), links)
    }
}
