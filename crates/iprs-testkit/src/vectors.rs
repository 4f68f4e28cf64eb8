//! Golden test vectors for the canonical node encoding.
//!
//! Each vector fixes a node's data and links and the exact bytes every
//! implementation must produce for it. Link targets are written as a single
//! repeated byte so vectors stay readable.

use iprs_core::{Link, Node, NodeHash, RecordPayload};
use serde::Serialize;

/// A golden node vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Node data.
    pub data: &'static [u8],
    /// Links as `(name, fill byte of the 32-byte target hash)`.
    pub links: &'static [(&'static str, u8)],
    /// Expected canonical encoding (hex).
    pub expected_hex: &'static str,
}

impl GoldenVector {
    /// The node this vector describes.
    pub fn node(&self) -> Node {
        let links = self
            .links
            .iter()
            .map(|(name, fill)| Link::new(*name, NodeHash::from_bytes([*fill; 32])))
            .collect();
        Node::new(self.data.to_vec(), links)
    }
}

/// Payload of the record vectors: `{0: 1, 1: h'', 2: 'hello'}`.
pub const HELLO_PAYLOAD_HEX: &str = "a300010140024568656c6c6f";

/// Payload `{0: 2, 1: h'', 2: 'c'}`.
const CHAIN_PAYLOAD: &[u8] = &[0xa3, 0x00, 0x02, 0x01, 0x40, 0x02, 0x41, 0x63];

const HELLO_PAYLOAD: &[u8] = &[
    0xa3, 0x00, 0x01, 0x01, 0x40, 0x02, 0x45, b'h', b'e', b'l', b'l', b'o',
];

/// Get all golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty leaf",
            data: b"",
            links: &[],
            expected_hex: "a200400180",
        },
        GoldenVector {
            name: "chain type identity node",
            data: b"iprs/chain",
            links: &[],
            expected_hex: "a2004a697072732f636861696e0180",
        },
        GoldenVector {
            name: "record with type and value links",
            data: HELLO_PAYLOAD,
            links: &[("value", 0x11), ("@type", 0x00)],
            expected_hex: concat!(
                "a2004ca300010140024568656c6c6f0182",
                "826540747970655820",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "826576616c75655820",
                "1111111111111111111111111111111111111111111111111111111111111111",
            ),
        },
        GoldenVector {
            name: "chain record with ordered parents",
            data: CHAIN_PAYLOAD,
            links: &[
                ("record", 0xcc),
                ("parent", 0xaa),
                ("value", 0x11),
                ("@type", 0x00),
                ("parent", 0xbb),
            ],
            expected_hex: concat!(
                "a20048a300020140024163018582654074797065582000000000000000000000",
                "000000000000000000000000000000000000000000008266706172656e745820",
                "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "8266706172656e745820",
                "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                "82667265636f72645820",
                "cccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccc",
                "826576616c75655820",
                "1111111111111111111111111111111111111111111111111111111111111111",
            ),
        },
    ]
}

/// Verify every vector, returning `(name, matches, actual hex)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = hex::encode(v.node().encode());
            (v.name.to_string(), actual == v.expected_hex, actual)
        })
        .collect()
}

/// A vector as exported for other implementations.
#[derive(Debug, Serialize)]
pub struct ExportedVector {
    pub name: String,
    pub data: String,
    pub links: Vec<(String, String)>,
    pub node_bytes: String,
    pub node_hash: String,
}

/// Export all vectors as pretty JSON, with the Blake3 node hash computed by
/// this implementation.
pub fn export_json() -> serde_json::Result<String> {
    let exported: Vec<ExportedVector> = all_vectors()
        .iter()
        .map(|v| {
            let node = v.node();
            ExportedVector {
                name: v.name.to_string(),
                data: hex::encode(v.data),
                links: node
                    .links()
                    .iter()
                    .map(|l| (l.name.clone(), l.hash.to_hex()))
                    .collect(),
                node_bytes: hex::encode(node.encode()),
                node_hash: node.hash().to_hex(),
            }
        })
        .collect();
    serde_json::to_string_pretty(&exported)
}

/// The payload used by the record vectors.
pub fn hello_payload() -> RecordPayload {
    RecordPayload::new(1, Vec::new(), b"hello".to_vec())
}
