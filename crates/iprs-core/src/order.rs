//! Deterministic total ordering of records.
//!
//! Any number of independent writers can pick the same "best" record from a
//! conflicting set using only local state. Records are ordered by:
//!
//! 1. `version`: a higher version always wins, whatever the validator says.
//! 2. `validator.order(a, b)`: the type's own policy (timestamps, signatures
//!    over some computation, ...), for equal versions.
//! 3. The canonical bytes of each record, compared lexicographically.
//!
//! Tier 3 makes the order total even for a validator that always returns
//! `Equal`. Tier 2 only decides when the validator is antisymmetric on the
//! pair; otherwise the pair falls through to tier 3.

use std::cmp::Ordering;

use crate::coding::marshal;
use crate::record::{AcceptAllValidator, Record, RecordRef, Validator};

/// Order two records under the given validator.
pub fn order(validator: &dyn Validator, a: &dyn Record, b: &dyn Record) -> Ordering {
    match a.version().cmp(&b.version()) {
        Ordering::Equal => {}
        by_version => return by_version,
    }

    let ab = validator.order(a, b);
    if ab != Ordering::Equal && validator.order(b, a) == ab.reverse() {
        return ab;
    }

    marshal(a).cmp(&marshal(b))
}

/// Order two records, consulting a validator only when both share a type.
pub fn order_records(a: &dyn Record, b: &dyn Record) -> Ordering {
    let a_type = a.record_type();
    if a_type.id() == b.record_type().id() {
        order(a_type.validator(), a, b)
    } else {
        order(&AcceptAllValidator, a, b)
    }
}

/// The greatest record under [`order_records`].
pub fn select_best<'a>(records: impl IntoIterator<Item = &'a RecordRef>) -> Option<RecordRef> {
    records
        .into_iter()
        .max_by(|a, b| order_records(a.as_ref(), b.as_ref()))
        .cloned()
}
