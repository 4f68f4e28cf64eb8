//! # IPRS Core
//!
//! Pure primitives for the InterPlanetary Record System: content-addressed
//! nodes, the record codec, the type registry, and record ordering.
//!
//! This crate performs no I/O. The only async piece is [`Context`], which
//! carries cancellation and deadlines into the store and chain crates.
//!
//! ## Key Types
//!
//! - [`Node`] - Data plus named links, hashed with Blake3 over its canonical bytes
//! - [`Record`] / [`RecordType`] / [`Validator`] - The pluggable record capabilities
//! - [`TypeSet`] - Registry used to decode records by their `@type` link
//! - [`RecordPayload`] - The `{version, validity, value}` triple in a record node
//!
//! ## Canonicalization
//!
//! Nodes are encoded as deterministic CBOR and decoding rejects any other
//! encoding of the same value. See the [`canonical`] module.

pub mod canonical;
pub mod coding;
pub mod context;
pub mod error;
pub mod node;
pub mod order;
pub mod payload;
pub mod record;
pub mod types;
pub mod typeset;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use coding::{
    marshal, node_has_required_links, node_has_type, unmarshal_from_set, unmarshal_node_from_set,
    unmarshal_node_type, unmarshal_type, LINK_TYPE, LINK_VALUE, REQUIRED_LINKS,
};
pub use context::Context;
pub use error::{CoreError, ValidationError};
pub use node::{Link, Node};
pub use order::{order, order_records, select_best};
pub use payload::RecordPayload;
pub use record::{type_node, AcceptAllValidator, Record, RecordRef, RecordType, Validator};
pub use types::NodeHash;
pub use typeset::TypeSet;
pub use validation::{check_valid, is_valid};
