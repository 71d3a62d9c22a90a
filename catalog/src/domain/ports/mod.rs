//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod classification_lookup;
mod deletion_flow;
mod record_store;

#[cfg(test)]
pub use classification_lookup::MockClassificationLookup;
pub use classification_lookup::{
    ClassificationLookup, ClassificationLookupError, FixtureClassificationLookup,
};
#[cfg(test)]
pub use deletion_flow::MockDeletionFlowTrigger;
pub use deletion_flow::{
    DeletionFlowError, DeletionFlowTrigger, DeletionJob, DeletionJobStatus, DeletionRequest,
    FixtureDeletionFlowTrigger,
};
#[cfg(test)]
pub use record_store::MockRecordStore;
pub use record_store::{InMemoryRecordStore, RecordStore, RecordStoreError};
