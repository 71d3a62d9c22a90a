//! Record manager orchestrating validation, versioning, and persistence.
//!
//! [`RecordService`] is the single entry point adapters call. Each operation
//! composes the validation pipeline, the lineage resolver, and the
//! assembler, then talks to the store through its port. Failures cross the
//! boundary as [`DomainError`] values; port error types never leak to
//! callers.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::assembler::{apply_status, apply_update, assemble_create};
use super::error::DomainError;
use super::links::extract_model_id;
use super::ports::{
    ClassificationLookup, DeletionFlowError, DeletionFlowTrigger, DeletionJob, DeletionRequest,
    RecordStore, RecordStoreError,
};
use super::query::{translate, RecordFilter};
use super::record::{CreatePayload, ProductStatus, Record, UpdatePayload, UpdateStatusPayload};
use super::validation::{CreateRule, UpdateRule, Validation, ValidationPipeline};
use super::versioning::{next_version, resolve_lineage};
use super::DomainResult;

/// How [`RecordService::delete`] treats a deletion request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletionPolicy {
    /// Remove the record synchronously; deleting an absent record succeeds.
    #[default]
    Unconditional,
    /// Hand the deletion to the external flow service instead of the store.
    ///
    /// The record must exist and be unpublished; it is not mutated, and the
    /// caller receives the accepted flow job.
    FlowTriggered,
}

/// Result of a delete operation under the configured policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was removed (or was already absent).
    Deleted,
    /// A deletion flow was accepted; the record is untouched until the flow
    /// completes out of band.
    FlowRequested(DeletionJob),
}

/// Orchestrator for the catalog record lifecycle.
#[derive(Clone)]
pub struct RecordService<S, L, D> {
    store: Arc<S>,
    deletion_flow: Arc<D>,
    deletion_policy: DeletionPolicy,
    validation: ValidationPipeline<S, L>,
}

impl<S, L, D> RecordService<S, L, D>
where
    S: RecordStore,
    L: ClassificationLookup,
    D: DeletionFlowTrigger,
{
    /// Wire the service to its capabilities with the default deletion policy.
    pub fn new(store: Arc<S>, lookup: Arc<L>, deletion_flow: Arc<D>) -> Self {
        Self {
            validation: ValidationPipeline::new(Arc::clone(&store), lookup),
            store,
            deletion_flow,
            deletion_policy: DeletionPolicy::default(),
        }
    }

    /// Replace the deletion policy.
    #[must_use]
    pub fn with_deletion_policy(mut self, policy: DeletionPolicy) -> Self {
        self.deletion_policy = policy;
        self
    }

    /// Return every record in the catalog.
    pub async fn list(&self) -> DomainResult<Vec<Record>> {
        debug!("listing all records");
        let records = self
            .store
            .find_all()
            .await
            .map_err(|err| store_failure("list", &err))?;
        info!(count = records.len(), "listed records");
        Ok(records)
    }

    /// Return the record with the given identifier.
    pub async fn get(&self, id: &str) -> DomainResult<Record> {
        debug!(id, "fetching record");
        self.store
            .find_by_id(id)
            .await
            .map_err(|err| store_failure("get", &err))?
            .ok_or_else(|| {
                info!(id, "record not found");
                not_found(id)
            })
    }

    /// Return the records matching every constraint in the filter.
    ///
    /// An empty filter matches every record.
    pub async fn find(&self, filter: &RecordFilter) -> DomainResult<Vec<Record>> {
        let predicates = translate(filter);
        debug!(predicates = predicates.len(), "querying records");
        let records = self
            .store
            .query(&predicates)
            .await
            .map_err(|err| store_failure("find", &err))?;
        info!(count = records.len(), "query matched records");
        Ok(records)
    }

    /// Highest version stored for a lineage, 0 when the lineage is empty.
    pub async fn find_last_version(&self, product_id: &str) -> DomainResult<u32> {
        debug!(product_id, "resolving last version");
        next_version(self.store.as_ref(), product_id)
            .await
            .map_err(|err| store_failure("find_last_version", &err))
    }

    /// Validate, version, assemble, and persist a new record.
    ///
    /// An identifier collision maps to `Conflict`; every other rule
    /// violation maps to `InvalidRequest`.
    pub async fn create(&self, payload: CreatePayload) -> DomainResult<Record> {
        debug!(id = %payload.id, "creating record");
        if let Validation::Violation { rule, reason } =
            self.validation.validate_create(&payload).await?
        {
            info!(id = %payload.id, reason, "create payload rejected");
            return Err(match rule {
                CreateRule::UniqueId => DomainError::conflict(reason),
                _ => DomainError::invalid_request(reason),
            });
        }

        let lineage = resolve_lineage(
            self.store.as_ref(),
            &payload.id,
            payload.product_id.as_deref(),
        )
        .await
        .map_err(|err| store_failure("create", &err))?;

        let record = assemble_create(payload, lineage);
        let saved = self
            .store
            .save(&record)
            .await
            .map_err(|err| store_failure("create", &err))?;
        info!(
            id = %saved.id,
            product_id = %saved.product_id,
            version = saved.product_version,
            "record created"
        );
        Ok(saved)
    }

    /// Validate and apply a partial update to a stored record.
    pub async fn update(&self, id: &str, payload: UpdatePayload) -> DomainResult<Record> {
        debug!(id, "updating record");
        if let Validation::Violation { rule, reason } =
            self.validation.validate_update(id, &payload).await?
        {
            info!(id, reason, "update payload rejected");
            return Err(match rule {
                UpdateRule::RecordExistence => DomainError::not_found(reason),
                UpdateRule::ClassificationMembership => DomainError::invalid_request(reason),
            });
        }

        let stored = self.fetch_existing(id, "update").await?;
        let saved = self
            .store
            .save(&apply_update(stored, payload))
            .await
            .map_err(|err| store_failure("update", &err))?;
        info!(id, "record updated");
        Ok(saved)
    }

    /// Replace only the lifecycle status of a stored record.
    pub async fn update_status(
        &self,
        id: &str,
        payload: UpdateStatusPayload,
    ) -> DomainResult<Record> {
        debug!(id, status = ?payload.product_status, "updating record status");
        let stored = self.fetch_existing(id, "update_status").await?;
        let saved = self
            .store
            .save(&apply_status(stored, payload))
            .await
            .map_err(|err| store_failure("update_status", &err))?;
        info!(id, status = ?saved.product_status, "record status updated");
        Ok(saved)
    }

    /// Delete a record under the configured policy.
    pub async fn delete(&self, id: &str) -> DomainResult<DeleteOutcome> {
        debug!(id, policy = ?self.deletion_policy, "deleting record");
        match self.deletion_policy {
            DeletionPolicy::Unconditional => {
                self.store
                    .delete(id)
                    .await
                    .map_err(|err| store_failure("delete", &err))?;
                info!(id, "record deleted");
                Ok(DeleteOutcome::Deleted)
            }
            DeletionPolicy::FlowTriggered => self.request_deletion_flow(id).await,
        }
    }

    async fn request_deletion_flow(&self, id: &str) -> DomainResult<DeleteOutcome> {
        let record = self.fetch_existing(id, "delete").await?;
        if record.product_status != ProductStatus::Unpublished {
            info!(id, "refusing deletion flow for published record");
            return Err(DomainError::invalid_request(format!(
                "record {id} is published; unpublish it before deletion"
            )));
        }

        let model_id = extract_model_id(&record.links)
            .map_err(|err| DomainError::internal(format!("record {id} has no usable model link: {err}")))?;
        let job = self
            .deletion_flow
            .request_deletion(DeletionRequest {
                model_id,
                model_link: record.links,
            })
            .await
            .map_err(|err| flow_failure(id, &err))?;
        info!(id, job_id = %job.job_id, "deletion flow accepted");
        Ok(DeleteOutcome::FlowRequested(job))
    }

    async fn fetch_existing(&self, id: &str, during: &str) -> DomainResult<Record> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(during, &err))?
            .ok_or_else(|| {
                info!(id, during, "record not found");
                not_found(id)
            })
    }
}

fn not_found(id: &str) -> DomainError {
    DomainError::not_found(format!("record with identifier {id} doesn't exist"))
}

fn store_failure(during: &str, err: &RecordStoreError) -> DomainError {
    error!(during, %err, "record store operation failed");
    DomainError::internal(format!("problem with the record store during {during}: {err}"))
}

fn flow_failure(id: &str, err: &DeletionFlowError) -> DomainError {
    error!(id, %err, "deletion flow request failed");
    DomainError::service_unavailable(format!("problem with the deletion flow service: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{
        DeletionJobStatus, FixtureClassificationLookup, FixtureDeletionFlowTrigger,
        MockDeletionFlowTrigger, MockRecordStore,
    };
    use crate::domain::test_fixtures::{fixture_create_payload, fixture_record};

    type Service =
        RecordService<MockRecordStore, FixtureClassificationLookup, FixtureDeletionFlowTrigger>;

    fn service(store: MockRecordStore) -> Service {
        RecordService::new(
            Arc::new(store),
            Arc::new(FixtureClassificationLookup::new(vec!["5".to_owned()])),
            Arc::new(FixtureDeletionFlowTrigger),
        )
    }

    #[tokio::test]
    async fn get_reports_missing_records_as_not_found() {
        let mut store = MockRecordStore::new();
        store.expect_find_by_id().return_once(|_| Ok(None));

        let error = service(store).get("missing").await.expect_err("record absent");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "record with identifier missing doesn't exist");
    }

    #[tokio::test]
    async fn create_starts_a_new_lineage_at_version_one() {
        let mut store = MockRecordStore::new();
        store.expect_find_by_id().return_once(|_| Ok(None));
        store
            .expect_save()
            .withf(|record| record.product_id == "r1" && record.product_version == 1)
            .return_once(|record| Ok(record.clone()));

        let record = service(store)
            .create(fixture_create_payload("r1"))
            .await
            .expect("create succeeds");
        assert_eq!(record.product_version, 1);
        assert_eq!(record.product_id, "r1");
    }

    #[tokio::test]
    async fn create_joins_an_existing_lineage_one_past_its_tip() {
        let mut latest = fixture_record("r2");
        latest.product_id = "r1".to_owned();
        latest.product_version = 2;

        let mut store = MockRecordStore::new();
        store.expect_find_by_id().times(2).returning(|id| {
            if id == "r3" {
                Ok(None)
            } else {
                Ok(Some(fixture_record(id)))
            }
        });
        store
            .expect_find_latest_in_lineage()
            .return_once(move |_| Ok(Some(latest)));
        store
            .expect_save()
            .withf(|record| record.product_version == 3)
            .return_once(|record| Ok(record.clone()));

        let mut payload = fixture_create_payload("r3");
        payload.product_id = Some("r1".to_owned());

        let record = service(store).create(payload).await.expect("create succeeds");
        assert_eq!(record.product_id, "r1");
        assert_eq!(record.product_version, 3);
    }

    #[tokio::test]
    async fn create_maps_duplicate_identifiers_to_conflict() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_by_id()
            .return_once(|_| Ok(Some(fixture_record("r1"))));
        store.expect_save().times(0);

        let error = service(store)
            .create(fixture_create_payload("r1"))
            .await
            .expect_err("duplicate id");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn create_maps_rule_violations_to_invalid_request() {
        let mut store = MockRecordStore::new();
        store.expect_find_by_id().return_once(|_| Ok(None));
        store.expect_save().times(0);

        let mut payload = fixture_create_payload("r1");
        payload.source_date_end = None;

        let error = service(store).create(payload).await.expect_err("missing date");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn create_maps_store_failures_to_internal() {
        let mut store = MockRecordStore::new();
        store.expect_find_by_id().return_once(|_| Ok(None));
        store
            .expect_save()
            .return_once(|_| Err(RecordStoreError::query("unique constraint race")));

        let error = service(store)
            .create(fixture_create_payload("r1"))
            .await
            .expect_err("save fails");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found() {
        let mut store = MockRecordStore::new();
        store.expect_find_by_id().return_once(|_| Ok(None));
        store.expect_save().times(0);

        let error = service(store)
            .update("missing", UpdatePayload::default())
            .await
            .expect_err("record absent");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_persists_the_merged_record() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_by_id()
            .times(2)
            .returning(|id| Ok(Some(fixture_record(id))));
        store
            .expect_save()
            .withf(|record| record.product_name == "renamed")
            .return_once(|record| Ok(record.clone()));

        let record = service(store)
            .update(
                "r1",
                UpdatePayload {
                    product_name: Some("renamed".to_owned()),
                    ..UpdatePayload::default()
                },
            )
            .await
            .expect("update succeeds");
        assert_eq!(record.product_name, "renamed");
    }

    #[tokio::test]
    async fn update_status_publishes_a_record() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_by_id()
            .return_once(|id| Ok(Some(fixture_record(id))));
        store
            .expect_save()
            .withf(|record| record.product_status == ProductStatus::Published)
            .return_once(|record| Ok(record.clone()));

        let record = service(store)
            .update_status(
                "r1",
                UpdateStatusPayload {
                    product_status: ProductStatus::Published,
                },
            )
            .await
            .expect("status update succeeds");
        assert_eq!(record.product_status, ProductStatus::Published);
    }

    #[tokio::test]
    async fn unconditional_delete_of_absent_record_succeeds() {
        let mut store = MockRecordStore::new();
        store.expect_delete().return_once(|_| Ok(()));

        let outcome = service(store).delete("missing").await.expect("delete succeeds");
        assert_eq!(outcome, DeleteOutcome::Deleted);
    }

    #[tokio::test]
    async fn flow_triggered_delete_returns_the_accepted_job() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_by_id()
            .return_once(|id| Ok(Some(fixture_record(id))));
        store.expect_delete().times(0);

        let mut flow = MockDeletionFlowTrigger::new();
        flow.expect_request_deletion()
            .withf(|request| request.model_id == "r1")
            .return_once(|_| {
                Ok(DeletionJob {
                    job_id: "job-7".to_owned(),
                    status: DeletionJobStatus::InProgress,
                })
            });

        let service = RecordService::new(
            Arc::new(store),
            Arc::new(FixtureClassificationLookup::new(vec!["5".to_owned()])),
            Arc::new(flow),
        )
        .with_deletion_policy(DeletionPolicy::FlowTriggered);

        let outcome = service.delete("r1").await.expect("flow accepted");
        let DeleteOutcome::FlowRequested(job) = outcome else {
            panic!("expected a flow job");
        };
        assert_eq!(job.job_id, "job-7");
        assert_eq!(job.status, DeletionJobStatus::InProgress);
    }

    #[tokio::test]
    async fn flow_triggered_delete_refuses_published_records() {
        let mut published = fixture_record("r1");
        published.product_status = ProductStatus::Published;

        let mut store = MockRecordStore::new();
        store
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(published)));
        store.expect_delete().times(0);

        let service = service(store).with_deletion_policy(DeletionPolicy::FlowTriggered);
        let error = service.delete("r1").await.expect_err("published record");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn flow_triggered_delete_of_missing_record_is_not_found() {
        let mut store = MockRecordStore::new();
        store.expect_find_by_id().return_once(|_| Ok(None));

        let service = service(store).with_deletion_policy(DeletionPolicy::FlowTriggered);
        let error = service.delete("missing").await.expect_err("record absent");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn flow_transport_failure_is_service_unavailable() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_by_id()
            .return_once(|id| Ok(Some(fixture_record(id))));

        let mut flow = MockDeletionFlowTrigger::new();
        flow.expect_request_deletion()
            .return_once(|_| Err(DeletionFlowError::transport("gateway timeout")));

        let service = RecordService::new(
            Arc::new(store),
            Arc::new(FixtureClassificationLookup::new(vec!["5".to_owned()])),
            Arc::new(flow),
        )
        .with_deletion_policy(DeletionPolicy::FlowTriggered);

        let error = service.delete("r1").await.expect_err("flow unreachable");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn find_last_version_passes_through_the_lineage_tip() {
        let mut latest = fixture_record("r2");
        latest.product_id = "lineage".to_owned();
        latest.product_version = 4;

        let mut store = MockRecordStore::new();
        store
            .expect_find_latest_in_lineage()
            .return_once(move |_| Ok(Some(latest)));

        let version = service(store)
            .find_last_version("lineage")
            .await
            .expect("lookup succeeds");
        assert_eq!(version, 4);
    }
}
