//! Node: the immutable unit of the content-addressed graph.
//!
//! A node is opaque payload bytes plus named links to other nodes. Links are
//! kept stably sorted by name, so nodes built from the same logical content
//! always encode to the same bytes, and links sharing a name (such as
//! several `parent` links) keep the order they were given in.

use bytes::Bytes;

use crate::canonical::{decode_node, encode_node};
use crate::error::CoreError;
use crate::types::NodeHash;

/// A named link to another node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    /// The link name (e.g. `@type`, `value`, `parent`).
    pub name: String,
    /// Hash of the target node.
    pub hash: NodeHash,
}

impl Link {
    /// Create a link.
    pub fn new(name: impl Into<String>, hash: NodeHash) -> Self {
        Self {
            name: name.into(),
            hash,
        }
    }
}

/// An immutable content-addressed graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    data: Bytes,
    links: Vec<Link>,
}

impl Node {
    /// Build a node, putting links in canonical order.
    pub fn new(data: impl Into<Bytes>, mut links: Vec<Link>) -> Self {
        // sort_by is stable: same-name links keep their relative order
        links.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        Self {
            data: data.into(),
            links,
        }
    }

    /// A node with no links.
    pub fn leaf(data: impl Into<Bytes>) -> Self {
        Self::new(data, Vec::new())
    }

    /// Decode a node from its canonical bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        decode_node(bytes)
    }

    /// The payload bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// All links in canonical order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The first link with the given name.
    pub fn link(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.name == name)
    }

    /// All links with the given name, in stored order.
    pub fn links_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.name == name)
    }

    /// Whether at least one link carries the given name.
    pub fn has_link(&self, name: &str) -> bool {
        self.link(name).is_some()
    }

    /// Canonical encoding of this node.
    pub fn encode(&self) -> Vec<u8> {
        encode_node(self)
    }

    /// Content address of this node.
    pub fn hash(&self) -> NodeHash {
        NodeHash::digest(&self.encode())
    }
}
