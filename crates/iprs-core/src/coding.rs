//! Record-level encoding and self-describing type dispatch.

use crate::error::CoreError;
use crate::node::Node;
use crate::record::{Record, RecordRef, RecordType};
use crate::typeset::TypeSet;
use crate::types::NodeHash;

/// Link naming the record's type node.
pub const LINK_TYPE: &str = "@type";

/// Link naming the record's value node.
pub const LINK_VALUE: &str = "value";

/// Links every record node must carry.
pub const REQUIRED_LINKS: [&str; 2] = [LINK_TYPE, LINK_VALUE];

/// Byte representation of a record: the canonical encoding of its node.
///
/// The encoder cannot fail on an in-memory node, so a constructed record
/// always marshals.
pub fn marshal(record: &dyn Record) -> Vec<u8> {
    record.node().encode()
}

/// Ensure a node has every named link, failing on the first missing one.
pub fn node_has_required_links(node: &Node, names: &[&str]) -> Result<(), CoreError> {
    for name in names {
        if !node.has_link(name) {
            return Err(CoreError::MissingLink((*name).to_string()));
        }
    }
    Ok(())
}

/// Decode a record node and check the links every record carries.
pub fn decode(bytes: &[u8]) -> Result<Node, CoreError> {
    let node = Node::decode(bytes)?;
    node_has_required_links(&node, &REQUIRED_LINKS)?;
    Ok(node)
}

/// The hash the node's `@type` link points at.
pub fn node_type(node: &Node) -> Result<NodeHash, CoreError> {
    node.link(LINK_TYPE)
        .map(|l| l.hash)
        .ok_or_else(|| CoreError::MissingLink(LINK_TYPE.to_string()))
}

/// Whether the node's `@type` link identifies the given type.
pub fn node_has_type(node: &Node, record_type: &dyn RecordType) -> Result<bool, CoreError> {
    Ok(node_type(node)? == record_type.id())
}

/// Decode a record of a known type.
pub fn unmarshal_type(record_type: &dyn RecordType, bytes: &[u8]) -> Result<RecordRef, CoreError> {
    let node = decode(bytes)?;
    unmarshal_node_type(record_type, node)
}

/// Construct a record of a known type from an already-decoded node.
pub fn unmarshal_node_type(record_type: &dyn RecordType, node: Node) -> Result<RecordRef, CoreError> {
    node_has_required_links(&node, &REQUIRED_LINKS)?;

    let actual = node_type(&node)?;
    let expected = record_type.id();
    if actual != expected {
        return Err(CoreError::TypeMismatch { expected, actual });
    }

    record_type.new_record(node)
}

/// Decode a record, choosing its type from the `@type` link.
pub fn unmarshal_from_set(types: &TypeSet, bytes: &[u8]) -> Result<RecordRef, CoreError> {
    let node = decode(bytes)?;
    unmarshal_node_from_set(types, node)
}

/// Dispatch an already-decoded node through the type set.
pub fn unmarshal_node_from_set(types: &TypeSet, node: Node) -> Result<RecordRef, CoreError> {
    node_has_required_links(&node, &REQUIRED_LINKS)?;

    let key = node_type(&node)?;
    let record_type = types.get(&key).ok_or(CoreError::UnsupportedType(key))?;
    record_type.new_record(node)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::node::Link;
    use crate::payload::RecordPayload;
    use crate::test_support::PlainType;

    #[test]
    fn test_missing_type_link_is_named() {
        let node = Node::new(
            b"x".to_vec(),
            vec![Link::new(LINK_VALUE, NodeHash::from_bytes([1; 32]))],
        );
        match decode(&node.encode()) {
            Err(CoreError::MissingLink(name)) => assert_eq!(name, "@type"),
            other => panic!("expected missing @type, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_value_link_is_named() {
        let node = Node::new(
            b"x".to_vec(),
            vec![Link::new(LINK_TYPE, NodeHash::from_bytes([1; 32]))],
        );
        match decode(&node.encode()) {
            Err(CoreError::MissingLink(name)) => assert_eq!(name, "value"),
            other => panic!("expected missing value, got {:?}", other),
        }
    }

    #[test]
    fn test_required_links_fail_fast() {
        let node = Node::leaf(b"x".to_vec());
        match node_has_required_links(&node, &["first", "second"]) {
            Err(CoreError::MissingLink(name)) => assert_eq!(name, "first"),
            other => panic!("expected missing first, got {:?}", other),
        }
    }

    #[test]
    fn test_unmarshal_type_roundtrip() {
        let plain = PlainType::new("iprs/plain");
        let record = plain.record(RecordPayload::new(7, b"ok".to_vec(), b"hello".to_vec()));

        let decoded = unmarshal_type(&plain, &marshal(record.as_ref())).unwrap();
        assert_eq!(decoded.version(), 7);
        assert_eq!(decoded.validity(), b"ok");
        assert_eq!(decoded.value(), b"hello");
        assert_eq!(decoded.node(), record.node());
    }

    #[test]
    fn test_unmarshal_type_mismatch() {
        let a = PlainType::new("iprs/a");
        let b = PlainType::new("iprs/b");
        let record = a.record(RecordPayload::new(1, Vec::new(), b"v".to_vec()));

        let result = unmarshal_type(&b, &marshal(record.as_ref()));
        assert!(matches!(result, Err(CoreError::TypeMismatch { .. })));
    }

    #[test]
    fn test_unmarshal_from_set_dispatches() {
        let a = Arc::new(PlainType::new("iprs/a"));
        let b = Arc::new(PlainType::new("iprs/b"));
        let types = TypeSet::from_types([
            a.clone() as Arc<dyn RecordType>,
            b.clone() as Arc<dyn RecordType>,
        ]);

        let ra = a.record(RecordPayload::new(1, Vec::new(), b"from a".to_vec()));
        let rb = b.record(RecordPayload::new(2, Vec::new(), b"from b".to_vec()));

        let da = unmarshal_from_set(&types, &marshal(ra.as_ref())).unwrap();
        let db = unmarshal_from_set(&types, &marshal(rb.as_ref())).unwrap();
        assert_eq!(da.record_type().id(), a.id());
        assert_eq!(db.record_type().id(), b.id());
        assert_eq!(db.value(), b"from b");
    }

    #[test]
    fn test_unmarshal_from_set_unsupported() {
        let known = Arc::new(PlainType::new("iprs/known"));
        let unknown = PlainType::new("iprs/unknown");
        let types = TypeSet::from_types([known as Arc<dyn RecordType>]);

        let record = unknown.record(RecordPayload::new(1, Vec::new(), b"v".to_vec()));
        match unmarshal_from_set(&types, &marshal(record.as_ref())) {
            Err(CoreError::UnsupportedType(key)) => assert_eq!(key, unknown.id()),
            other => panic!("expected unsupported type, got {:?}", other),
        }
    }
}
