//! Validators with simple, predictable policies.

use std::cmp::Ordering;

use iprs_core::{Record, ValidationError, Validator};

/// Accepts records whose validity starts with a fixed prefix.
///
/// Orders nothing; ties fall through to the canonical bytes.
#[derive(Debug, Clone)]
pub struct PrefixValidator {
    prefix: Vec<u8>,
}

impl PrefixValidator {
    pub fn new(prefix: &[u8]) -> Self {
        Self {
            prefix: prefix.to_vec(),
        }
    }
}

impl Validator for PrefixValidator {
    fn valid(&self, record: &dyn Record) -> Result<bool, ValidationError> {
        Ok(record.validity().starts_with(&self.prefix))
    }

    fn order(&self, _a: &dyn Record, _b: &dyn Record) -> Ordering {
        Ordering::Equal
    }
}

/// Rejects everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAllValidator;

impl Validator for RejectAllValidator {
    fn valid(&self, _record: &dyn Record) -> Result<bool, ValidationError> {
        Ok(false)
    }

    fn order(&self, _a: &dyn Record, _b: &dyn Record) -> Ordering {
        Ordering::Equal
    }
}

/// Fails to validate anything, as a validator with an unreachable
/// dependency would.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingValidator;

impl Validator for FailingValidator {
    fn valid(&self, _record: &dyn Record) -> Result<bool, ValidationError> {
        Err(ValidationError::Failed("validator unavailable".to_string()))
    }

    fn order(&self, _a: &dyn Record, _b: &dyn Record) -> Ordering {
        Ordering::Equal
    }
}

/// Claims the first argument is always lower. Inconsistent on purpose.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContrarianValidator;

impl Validator for ContrarianValidator {
    fn valid(&self, _record: &dyn Record) -> Result<bool, ValidationError> {
        Ok(true)
    }

    fn order(&self, _a: &dyn Record, _b: &dyn Record) -> Ordering {
        Ordering::Less
    }
}

/// Accepts everything and prefers the lexicographically greater validity,
/// like a validity field holding a big-endian timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidityOrderValidator;

impl Validator for ValidityOrderValidator {
    fn valid(&self, _record: &dyn Record) -> Result<bool, ValidationError> {
        Ok(true)
    }

    fn order(&self, a: &dyn Record, b: &dyn Record) -> Ordering {
        a.validity().cmp(b.validity())
    }
}
