//! Canonical CBOR encoding for nodes and record payloads.
//!
//! This module implements the RFC 8949 Core Deterministic Encoding subset
//! that IPRS needs:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats, no tags
//!
//! The canonical encoding is critical: the same node always produces
//! identical bytes (and thus an identical hash), and the last tier of record
//! ordering compares these bytes directly.
//!
//! Decoding is strict. Bytes are parsed, rebuilt and re-encoded, and any
//! input that does not match its canonical re-encoding is rejected.

use bytes::Bytes;
use ciborium::value::Value;

use crate::error::CoreError;
use crate::node::{Link, Node};
use crate::payload::RecordPayload;
use crate::types::NodeHash;

/// Map keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const NODE_DATA: u64 = 0;
    pub const NODE_LINKS: u64 = 1;

    pub const PAYLOAD_VERSION: u64 = 0;
    pub const PAYLOAD_VALIDITY: u64 = 1;
    pub const PAYLOAD_VALUE: u64 = 2;
}

/// Encode a node to canonical CBOR bytes.
///
/// Format: `{0: data, 1: [[name, hash], ...]}` with links in node order.
pub fn encode_node(node: &Node) -> Vec<u8> {
    let links: Vec<Value> = node
        .links()
        .iter()
        .map(|link| {
            Value::Array(vec![
                Value::Text(link.name.clone()),
                Value::Bytes(link.hash.0.to_vec()),
            ])
        })
        .collect();

    let value = Value::Map(vec![
        (
            Value::Integer(keys::NODE_DATA.into()),
            Value::Bytes(node.data().to_vec()),
        ),
        (Value::Integer(keys::NODE_LINKS.into()), Value::Array(links)),
    ]);

    encode_cbor_value_canonical(&value)
}

/// Encode a record payload to canonical CBOR bytes.
///
/// Format: `{0: version, 1: validity, 2: value}`.
pub fn encode_payload(payload: &RecordPayload) -> Vec<u8> {
    let value = Value::Map(vec![
        (
            Value::Integer(keys::PAYLOAD_VERSION.into()),
            Value::Integer(payload.version.into()),
        ),
        (
            Value::Integer(keys::PAYLOAD_VALIDITY.into()),
            Value::Bytes(payload.validity.to_vec()),
        ),
        (
            Value::Integer(keys::PAYLOAD_VALUE.into()),
            Value::Bytes(payload.value.to_vec()),
        ),
    ]);

    encode_cbor_value_canonical(&value)
}

/// Decode a node from canonical bytes.
pub fn decode_node(bytes: &[u8]) -> Result<Node, CoreError> {
    let value: Value =
        ciborium::from_reader(bytes).map_err(|e| CoreError::Malformed(e.to_string()))?;

    let map = match &value {
        Value::Map(m) => m,
        _ => return Err(CoreError::Malformed("expected node map".into())),
    };

    let data = match lookup(map, keys::NODE_DATA) {
        Some(Value::Bytes(b)) => Bytes::copy_from_slice(b),
        _ => return Err(CoreError::Malformed("missing node data".into())),
    };

    let links = match lookup(map, keys::NODE_LINKS) {
        Some(Value::Array(arr)) => arr
            .iter()
            .map(value_to_link)
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(CoreError::Malformed("missing node links".into())),
    };

    let node = Node::new(data, links);
    if encode_node(&node) != bytes {
        return Err(CoreError::NonCanonical(
            "node bytes differ from canonical re-encoding".into(),
        ));
    }

    Ok(node)
}

/// Decode a record payload from canonical bytes.
pub fn decode_payload(bytes: &[u8]) -> Result<RecordPayload, CoreError> {
    let value: Value =
        ciborium::from_reader(bytes).map_err(|e| CoreError::Malformed(e.to_string()))?;

    let map = match &value {
        Value::Map(m) => m,
        _ => return Err(CoreError::Malformed("expected payload map".into())),
    };

    let version = match lookup(map, keys::PAYLOAD_VERSION) {
        Some(Value::Integer(i)) => u64::try_from(*i)
            .map_err(|_| CoreError::Malformed("version out of range".into()))?,
        _ => return Err(CoreError::Malformed("missing version".into())),
    };

    let validity = match lookup(map, keys::PAYLOAD_VALIDITY) {
        Some(Value::Bytes(b)) => Bytes::copy_from_slice(b),
        _ => return Err(CoreError::Malformed("missing validity".into())),
    };

    let value = match lookup(map, keys::PAYLOAD_VALUE) {
        Some(Value::Bytes(b)) => Bytes::copy_from_slice(b),
        _ => return Err(CoreError::Malformed("missing value".into())),
    };

    let payload = RecordPayload {
        version,
        validity,
        value,
    };
    if encode_payload(&payload) != bytes {
        return Err(CoreError::NonCanonical(
            "payload bytes differ from canonical re-encoding".into(),
        ));
    }

    Ok(payload)
}

/// Find a map entry by integer key.
fn lookup(map: &[(Value, Value)], key: u64) -> Option<&Value> {
    map.iter()
        .find(|(k, _)| matches!(k, Value::Integer(i) if u64::try_from(*i).ok() == Some(key)))
        .map(|(_, v)| v)
}

/// Convert a `[name, hash]` pair back to a link.
fn value_to_link(value: &Value) -> Result<Link, CoreError> {
    match value {
        Value::Array(pair) if pair.len() == 2 => {
            let name = match &pair[0] {
                Value::Text(s) => s.clone(),
                _ => return Err(CoreError::Malformed("link name must be text".into())),
            };
            let hash = match &pair[1] {
                Value::Bytes(b) => NodeHash::try_from(b.as_slice())
                    .map_err(|_| CoreError::Malformed(format!("link {} hash length", name)))?,
                _ => return Err(CoreError::Malformed("link hash must be bytes".into())),
            };
            Ok(Link { name, hash })
        }
        _ => Err(CoreError::Malformed("link must be a [name, hash] pair".into())),
    }
}

/// Encode a CBOR Value to canonical bytes.
fn encode_cbor_value_canonical(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value);
    buf
}

/// Recursively encode a CBOR value.
///
/// Only the value kinds built by this module are reachable here.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::Text(s) => encode_text(buf, s),
        Value::Array(arr) => encode_array(buf, arr),
        Value::Map(entries) => encode_map_canonical(buf, entries),
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
        _ => unreachable!("canonical encoding only covers values built by this module"),
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, 1, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode an array (major type 4).
fn encode_array(buf: &mut Vec<u8>, arr: &[Value]) {
    encode_uint(buf, 4, arr.len() as u64);
    for item in arr {
        encode_value_to(buf, item);
    }
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut key_value_pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, key_value_pairs.len() as u64);
    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}
