//! Business-rule validation for create and update payloads.
//!
//! Rules form an explicit ordered list and run until the first violation,
//! so rule order and short-circuit behaviour are a testable contract
//! rather than an artifact of source layout. A violation names the rule
//! that failed, letting the orchestrator map identifier collisions to
//! `Conflict` and everything else to `InvalidRequest`.
//!
//! Update validation deliberately checks classification before record
//! existence: a missing record with an invalid classification reports the
//! classification error. This matches the reference behaviour of the
//! deployed system and changing it would alter caller-visible responses.

use std::sync::Arc;

use tracing::error;

use super::error::DomainError;
use super::ports::{
    ClassificationLookup, ClassificationLookupError, RecordStore, RecordStoreError,
};
use super::record::{CreatePayload, UpdatePayload};
use super::DomainResult;

/// Rules applied to a create payload, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateRule {
    /// The payload's `id` must not already exist.
    UniqueId,
    /// A supplied `productId` must name an existing record.
    ProductIdExists,
    /// Both source dates are required and must be ordered.
    DateOrdering,
    /// When both resolutions are supplied they must be ordered.
    ResolutionOrdering,
    /// The classification must belong to the governed value set.
    ClassificationMembership,
}

/// Execution order of the create rules.
pub const CREATE_RULES: [CreateRule; 5] = [
    CreateRule::UniqueId,
    CreateRule::ProductIdExists,
    CreateRule::DateOrdering,
    CreateRule::ResolutionOrdering,
    CreateRule::ClassificationMembership,
];

/// Rules applied to an update payload, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateRule {
    /// A supplied classification must belong to the governed value set.
    ClassificationMembership,
    /// The updated record must exist.
    RecordExistence,
}

/// Execution order of the update rules.
pub const UPDATE_RULES: [UpdateRule; 2] = [
    UpdateRule::ClassificationMembership,
    UpdateRule::RecordExistence,
];

/// Outcome of running a rule pipeline to completion or first violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<R> {
    /// Every rule passed.
    Valid,
    /// A rule failed; no later rule was evaluated.
    Violation {
        /// The rule that failed.
        rule: R,
        /// Human-readable violation reason.
        reason: String,
    },
}

/// Ordered business-rule checks backed by the store and lookup ports.
#[derive(Clone)]
pub struct ValidationPipeline<S, L> {
    store: Arc<S>,
    lookup: Arc<L>,
}

impl<S, L> ValidationPipeline<S, L> {
    /// Create a pipeline over the given record store and lookup capability.
    pub fn new(store: Arc<S>, lookup: Arc<L>) -> Self {
        Self { store, lookup }
    }
}

impl<S, L> ValidationPipeline<S, L>
where
    S: RecordStore,
    L: ClassificationLookup,
{
    /// Run the create rules in order, stopping at the first violation.
    ///
    /// A violation is an expected outcome and arrives in the `Ok` channel;
    /// the `Err` channel is reserved for capability failures (store or
    /// lookup unreachable).
    pub async fn validate_create(
        &self,
        payload: &CreatePayload,
    ) -> DomainResult<Validation<CreateRule>> {
        for rule in CREATE_RULES {
            if let Some(reason) = self.check_create_rule(rule, payload).await? {
                return Ok(Validation::Violation { rule, reason });
            }
        }
        Ok(Validation::Valid)
    }

    /// Run the update rules in order, stopping at the first violation.
    pub async fn validate_update(
        &self,
        id: &str,
        payload: &UpdatePayload,
    ) -> DomainResult<Validation<UpdateRule>> {
        for rule in UPDATE_RULES {
            if let Some(reason) = self.check_update_rule(rule, id, payload).await? {
                return Ok(Validation::Violation { rule, reason });
            }
        }
        Ok(Validation::Valid)
    }

    async fn check_create_rule(
        &self,
        rule: CreateRule,
        payload: &CreatePayload,
    ) -> DomainResult<Option<String>> {
        match rule {
            CreateRule::UniqueId => self.check_unique_id(&payload.id).await,
            CreateRule::ProductIdExists => {
                self.check_product_id_exists(payload.product_id.as_deref())
                    .await
            }
            CreateRule::DateOrdering => Ok(check_date_ordering(payload)),
            CreateRule::ResolutionOrdering => Ok(check_resolution_ordering(
                payload.min_resolution_meter,
                payload.max_resolution_meter,
            )),
            CreateRule::ClassificationMembership => {
                self.check_classification(&payload.classification).await
            }
        }
    }

    async fn check_update_rule(
        &self,
        rule: UpdateRule,
        id: &str,
        payload: &UpdatePayload,
    ) -> DomainResult<Option<String>> {
        match rule {
            UpdateRule::ClassificationMembership => match &payload.classification {
                // Absence is not an error on update; the stored value stands.
                None => Ok(None),
                Some(classification) => self.check_classification(classification).await,
            },
            UpdateRule::RecordExistence => self.check_record_exists(id).await,
        }
    }

    async fn check_unique_id(&self, id: &str) -> DomainResult<Option<String>> {
        let existing = self
            .store
            .find_by_id(id)
            .await
            .map_err(|err| map_store_error("validation of id uniqueness", &err))?;
        Ok(existing.map(|_| format!("record with identifier {id} already exists")))
    }

    async fn check_product_id_exists(
        &self,
        product_id: Option<&str>,
    ) -> DomainResult<Option<String>> {
        let Some(product_id) = product_id else {
            return Ok(None);
        };
        let existing = self
            .store
            .find_by_id(product_id)
            .await
            .map_err(|err| map_store_error("validation of productId", &err))?;
        if existing.is_none() {
            return Ok(Some(format!("productId {product_id} doesn't exist")));
        }
        Ok(None)
    }

    async fn check_record_exists(&self, id: &str) -> DomainResult<Option<String>> {
        let existing = self
            .store
            .find_by_id(id)
            .await
            .map_err(|err| map_store_error("validation of record existence", &err))?;
        if existing.is_none() {
            return Ok(Some(format!("record with identifier {id} doesn't exist")));
        }
        Ok(None)
    }

    async fn check_classification(&self, classification: &str) -> DomainResult<Option<String>> {
        let valid = self.lookup.classifications().await.map_err(|err| {
            error!(%err, "classification lookup failed");
            map_lookup_error(&err)
        })?;
        if valid.iter().any(|value| value == classification) {
            return Ok(None);
        }
        Ok(Some(format!(
            "classification {classification} is not a valid value; optional values: {}",
            valid.join(",")
        )))
    }
}

fn check_date_ordering(payload: &CreatePayload) -> Option<String> {
    let (Some(start), Some(end)) = (payload.source_date_start, payload.source_date_end) else {
        return Some("sourceDateStart and sourceDateEnd are required".to_owned());
    };
    if start > end {
        return Some("sourceDateStart should not be later than sourceDateEnd".to_owned());
    }
    None
}

fn check_resolution_ordering(min: Option<f64>, max: Option<f64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => {
            Some("minResolutionMeter should not be bigger than maxResolutionMeter".to_owned())
        }
        _ => None,
    }
}

fn map_store_error(during: &str, err: &RecordStoreError) -> DomainError {
    DomainError::internal(format!("problem with the record store during {during}: {err}"))
}

fn map_lookup_error(err: &ClassificationLookupError) -> DomainError {
    DomainError::service_unavailable(format!(
        "problem with the classification lookup service: {err}"
    ))
}
