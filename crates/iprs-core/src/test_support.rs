//! Minimal record type used by this crate's unit tests.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{CoreError, ValidationError};
use crate::node::Node;
use crate::payload::RecordPayload;
use crate::record::{type_node, AcceptAllValidator, Record, RecordRef, RecordType, Validator};

/// Always answers `Less`, whichever side it is asked about.
pub struct ContrarianValidator;

impl Validator for ContrarianValidator {
    fn valid(&self, _record: &dyn Record) -> Result<bool, ValidationError> {
        Ok(true)
    }

    fn order(&self, _a: &dyn Record, _b: &dyn Record) -> Ordering {
        Ordering::Less
    }
}

/// Accepts validity starting with `ok`, errors on empty validity, and
/// prefers longer validity fields.
pub struct ValidityFlagValidator;

impl Validator for ValidityFlagValidator {
    fn valid(&self, record: &dyn Record) -> Result<bool, ValidationError> {
        let validity = record.validity();
        if validity.is_empty() {
            return Err(ValidationError::Failed("empty validity".into()));
        }
        Ok(validity.starts_with(b"ok"))
    }

    fn order(&self, a: &dyn Record, b: &dyn Record) -> Ordering {
        a.validity().len().cmp(&b.validity().len())
    }
}

#[derive(Clone)]
pub struct PlainType {
    inner: Arc<PlainTypeInner>,
}

struct PlainTypeInner {
    node: Node,
    validator: Box<dyn Validator>,
}

impl PlainType {
    pub fn new(label: &str) -> Self {
        Self::with_validator(label, AcceptAllValidator)
    }

    pub fn with_validator(label: &str, validator: impl Validator + 'static) -> Self {
        Self {
            inner: Arc::new(PlainTypeInner {
                node: type_node(label),
                validator: Box::new(validator),
            }),
        }
    }

    pub fn record(&self, payload: RecordPayload) -> RecordRef {
        let node = payload.to_node(self.id(), Vec::new());
        Arc::new(PlainRecord {
            record_type: self.clone(),
            payload,
            node,
        })
    }
}

impl fmt::Debug for PlainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlainType").field(&self.id()).finish()
    }
}

impl RecordType for PlainType {
    fn node(&self) -> &Node {
        &self.inner.node
    }

    fn validator(&self) -> &dyn Validator {
        self.inner.validator.as_ref()
    }

    fn new_record(&self, node: Node) -> Result<RecordRef, CoreError> {
        let payload = RecordPayload::decode(node.data())?;
        Ok(Arc::new(PlainRecord {
            record_type: self.clone(),
            payload,
            node,
        }))
    }
}

#[derive(Debug)]
pub struct PlainRecord {
    record_type: PlainType,
    payload: RecordPayload,
    node: Node,
}

impl Record for PlainRecord {
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
