//! Proptest generators for property-based testing.

use proptest::prelude::*;

use iprs_chain::{ChainRecord, ChainType};
use iprs_core::{Link, Node, NodeHash, RecordPayload};

/// Generate a random NodeHash.
pub fn node_hash() -> impl Strategy<Value = NodeHash> {
    any::<[u8; 32]>().prop_map(NodeHash::from_bytes)
}

/// Generate opaque bytes of at most `max_len`.
pub fn bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a link name, biased towards the names records use.
pub fn link_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("@type".to_string()),
        Just("value".to_string()),
        Just("parent".to_string()),
        Just("record".to_string()),
        "[a-z]{1,8}",
    ]
}

/// Generate a node with up to `max_links` links.
pub fn node(max_links: usize) -> impl Strategy<Value = Node> {
    (
        bytes(64),
        prop::collection::vec((link_name(), node_hash()), 0..=max_links),
    )
        .prop_map(|(data, links)| {
            Node::new(
                data,
                links.into_iter().map(|(name, hash)| Link::new(name, hash)).collect(),
            )
        })
}

/// Generate a record payload.
pub fn record_payload() -> impl Strategy<Value = RecordPayload> {
    (any::<u64>(), bytes(16), bytes(64))
        .prop_map(|(version, validity, value)| RecordPayload::new(version, validity, value))
}

/// Parameters for generating a chain record.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub version: u64,
    pub validity: Vec<u8>,
    pub value: Vec<u8>,
    pub parents: Vec<NodeHash>,
    pub record: NodeHash,
}

impl Arbitrary for ChainParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            0u64..=16,
            bytes(16),
            bytes(64),
            prop::collection::vec(node_hash(), 0..4),
            node_hash(),
        )
            .prop_map(|(version, validity, value, parents, record)| ChainParams {
                version,
                validity,
                value,
                parents,
                record,
            })
            .boxed()
    }
}

/// Build a chain record of the given type from parameters.
pub fn chain_record_from_params(chain: &ChainType, params: &ChainParams) -> ChainRecord {
    let mut builder = chain
        .builder()
        .version(params.version)
        .validity(params.validity.clone())
        .value(params.value.clone())
        .record(params.record);
    for parent in &params.parents {
        builder = builder.parent(*parent);
    }
    builder
        .build()
        .unwrap_or_else(|e| panic!("generated record failed to build: {}", e))
}
