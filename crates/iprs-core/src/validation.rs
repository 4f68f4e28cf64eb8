//! Record validation through the record's own type.

use crate::error::ValidationError;
use crate::record::Record;

/// Check a record with the validator of its type.
///
/// A `false` verdict becomes [`ValidationError::Rejected`]; validator errors
/// are returned unchanged.
pub fn check_valid(record: &dyn Record) -> Result<(), ValidationError> {
    if record.record_type().validator().valid(record)? {
        Ok(())
    } else {
        Err(ValidationError::Rejected)
    }
}

/// Whether a record is valid. An error while validating counts as invalid.
pub fn is_valid(record: &dyn Record) -> bool {
    check_valid(record).is_ok()
}
