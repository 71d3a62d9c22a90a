//! Flow-trigger capability for asynchronous record deletion.
//!
//! Under the flow-triggered deletion policy the engine does not delete the
//! record itself; it asks an external orchestration service to run the
//! deletion flow and returns the resulting job handle to the caller. The
//! record is left untouched until the flow completes out of band.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::define_port_error;

define_port_error! {
    /// Errors raised by deletion flow-trigger adapters.
    pub enum DeletionFlowError {
        /// The flow-trigger service could not be reached or rejected the request.
        Transport(transport) => "deletion flow request failed: {message}",
    }
}

/// Request to start a deletion flow for one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionRequest {
    /// Identifier of the record whose model should be deleted.
    pub model_id: String,
    /// Locator of the deletable model resource, taken from the record's links.
    pub model_link: String,
}

/// Lifecycle status of a deletion flow job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionJobStatus {
    /// The flow has been accepted and is running.
    #[serde(rename = "In-Progress")]
    InProgress,
    /// The flow finished successfully.
    Completed,
    /// The flow finished with an error.
    Failed,
}

/// Handle to an accepted deletion flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionJob {
    /// Identifier of the orchestration job.
    #[serde(rename = "jobID")]
    pub job_id: String,
    /// Status reported at acceptance time.
    pub status: DeletionJobStatus,
}

/// Port for requesting asynchronous deletion flows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeletionFlowTrigger: Send + Sync {
    /// Ask the orchestration service to start a deletion flow.
    async fn request_deletion(
        &self,
        request: DeletionRequest,
    ) -> Result<DeletionJob, DeletionFlowError>;
}

/// Fixture implementation that accepts every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDeletionFlowTrigger;

#[async_trait]
impl DeletionFlowTrigger for FixtureDeletionFlowTrigger {
    async fn request_deletion(
        &self,
        _request: DeletionRequest,
    ) -> Result<DeletionJob, DeletionFlowError> {
        Ok(DeletionJob {
            job_id: uuid::Uuid::nil().to_string(),
            status: DeletionJobStatus::InProgress,
        })
    }
}
