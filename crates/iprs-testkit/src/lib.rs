//! # IPRS Testkit
//!
//! Testing utilities for IPRS.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Canonical node encodings every implementation must reproduce
//! - **Generators**: Proptest strategies for nodes, payloads and chain records
//! - **Validators**: Small validators with predictable policies
//! - **Fixtures**: A chain type, type set and DAG ready for integration tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use iprs_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hex) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, hex);
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use iprs_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let record = fixture.entry(1, b"initial data");
//! ```

pub mod fixtures;
pub mod generators;
pub mod validators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use generators::{chain_record_from_params, ChainParams};
pub use validators::{
    ContrarianValidator, FailingValidator, PrefixValidator, RejectAllValidator,
    ValidityOrderValidator,
};
pub use vectors::{all_vectors, export_json, verify_all_vectors, GoldenVector};
