//! Domain primitives, codecs, and services for the metadata catalog.
//!
//! Purpose: Turn untrusted client payloads into durable, internally
//! consistent records, maintain per-product version chains, and answer
//! filtered queries. Types are immutable where practical and document their
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Everything that touches the outside world (record store, classification
//! lookup, deletion flow trigger) is reached through the traits in
//! [`ports`].

pub mod assembler;
pub mod error;
pub mod footprint;
pub mod links;
pub mod ports;
pub mod query;
pub mod record;
pub mod record_service;
pub mod sanitize;
pub mod validation;
pub mod versioning;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::error::{DomainError, ErrorCode};
pub use self::footprint::{Footprint, FootprintValidationError};
pub use self::links::{Link, LinkFormatError};
pub use self::query::{Predicate, RecordFilter};
pub use self::record::{
    CreatePayload, ProductStatus, ProductType, Record, RecordKind, UpdatePayload,
    UpdateStatusPayload,
};
pub use self::record_service::{DeleteOutcome, DeletionPolicy, RecordService};
pub use self::versioning::Lineage;

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
