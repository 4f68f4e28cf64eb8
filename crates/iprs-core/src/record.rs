//! Record, RecordType and Validator: the pluggable capabilities of the
//! record system.
//!
//! A record is some data relevant to a distributed system, wrapped around a
//! content-addressed node. Each record belongs to a record type, and each
//! record type is identified by the hash of a canonical node. That hash is
//! linked from every record as `@type`, so a record always describes its own
//! kind.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{CoreError, ValidationError};
use crate::node::Node;
use crate::types::NodeHash;

/// A shared, immutable record.
pub type RecordRef = Arc<dyn Record>;

/// An algorithm for determining the validity of records of one type, and for
/// ordering them.
pub trait Validator: Send + Sync {
    /// Whether a record is valid in present circumstances.
    ///
    /// This could include checking cryptographic signatures, or validity
    /// against external infrastructure such as a PKI or a time source.
    fn valid(&self, record: &dyn Record) -> Result<bool, ValidationError>;

    /// Order two records of this validator's type.
    ///
    /// Only consulted for records with equal versions. Returning `Equal`
    /// is always allowed; [`order`](crate::order::order) falls back to the
    /// canonical bytes.
    fn order(&self, a: &dyn Record, b: &dyn Record) -> Ordering;
}

/// A record kind.
pub trait RecordType: Send + Sync + fmt::Debug {
    /// The canonical node whose hash identifies this type.
    fn node(&self) -> &Node;

    /// The validator bound to this type.
    fn validator(&self) -> &dyn Validator;

    /// Construct a record of this type from a decoded node.
    fn new_record(&self, node: Node) -> Result<RecordRef, CoreError>;

    /// The type identifier: hash of [`node`](RecordType::node).
    fn id(&self) -> NodeHash {
        self.node().hash()
    }
}

/// A typed, versioned value wrapped around a node.
pub trait Record: Send + Sync + fmt::Debug {
    /// The node representing this record.
    fn node(&self) -> &Node;

    /// The type of the record.
    fn record_type(&self) -> &dyn RecordType;

    /// The version number of the record.
    fn version(&self) -> u64;

    /// Data used by the validator to determine validity.
    fn validity(&self) -> &[u8];

    /// Data carried by the record for the application.
    fn value(&self) -> &[u8];
}

/// Build the canonical identity node for a record type from a label.
pub fn type_node(label: &str) -> Node {
    Node::leaf(label.as_bytes().to_vec())
}

/// A validator that accepts every record and never orders.
///
/// Ordering then relies on versions and canonical bytes only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllValidator;

impl Validator for AcceptAllValidator {
    fn valid(&self, _record: &dyn Record) -> Result<bool, ValidationError> {
        Ok(true)
    }

    fn order(&self, _a: &dyn Record, _b: &dyn Record) -> Ordering {
        Ordering::Equal
    }
}
