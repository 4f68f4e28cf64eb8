//! # IPRS Chain
//!
//! A record type whose entries link to their parents, and the DAG service
//! used to resolve those links.
//!
//! Parent resolution is ordered and all-or-nothing: see
//! [`ChainRecord::parents`].

pub mod chain;
pub mod dag;
pub mod error;

pub use chain::{ChainRecord, ChainRecordBuilder, ChainType, CHAIN_TYPE_LABEL, LINK_PARENT, LINK_RECORD};
pub use dag::{DagService, MemoryDag};
pub use error::{ChainError, Result};
