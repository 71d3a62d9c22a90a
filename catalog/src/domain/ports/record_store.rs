//! Abstract keyed repository port for catalog records.
//!
//! The engine never talks to a database directly; it reads and writes
//! through this port so persistence adapters (and tests) can supply their
//! own storage. The port exposes exactly the operations the engine needs:
//! keyed find/save/delete, a max-version lineage lookup, and a conjunctive
//! predicate query.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::query::Predicate;
use crate::domain::record::Record;

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// Store connection could not be established.
        Connection(connection) => "record store connection failed: {message}",
        /// Operation failed during execution or row conversion.
        Query(query) => "record store query failed: {message}",
    }
}

/// Port for reading and writing catalog records.
///
/// Uniqueness of `id` is ultimately enforced by the adapter's storage
/// constraints; the engine's pre-write checks narrow but cannot close the
/// race between concurrent creates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Return every record, in store-defined order.
    async fn find_all(&self) -> Result<Vec<Record>, RecordStoreError>;

    /// Return the record with the given identifier, if any.
    async fn find_by_id(&self, id: &str) -> Result<Option<Record>, RecordStoreError>;

    /// Return the record with the highest `productVersion` in a lineage.
    ///
    /// An unknown `product_id` yields `None` rather than an error.
    async fn find_latest_in_lineage(
        &self,
        product_id: &str,
    ) -> Result<Option<Record>, RecordStoreError>;

    /// Insert or replace a record keyed by its `id`.
    async fn save(&self, record: &Record) -> Result<Record, RecordStoreError>;

    /// Remove the record with the given identifier.
    ///
    /// Removing an absent identifier is a success, not an error.
    async fn delete(&self, id: &str) -> Result<(), RecordStoreError>;

    /// Return the records matching every predicate in the conjunction.
    ///
    /// An empty predicate set matches every record.
    async fn query(&self, predicates: &[Predicate]) -> Result<Vec<Record>, RecordStoreError>;
}

/// In-memory record store for tests and fixtures.
///
/// Keys records by `id` in a [`BTreeMap`], so `find_all` returns records in
/// ascending identifier order.
///
/// # Examples
///
/// ```
/// # use catalog::domain::ports::{InMemoryRecordStore, RecordStore};
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryRecordStore::default();
/// assert!(store.find_all().await.unwrap().is_empty());
/// assert!(store.find_by_id("missing").await.unwrap().is_none());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<BTreeMap<String, Record>>,
}

impl InMemoryRecordStore {
    fn records(&self) -> MutexGuard<'_, BTreeMap<String, Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_all(&self) -> Result<Vec<Record>, RecordStoreError> {
        Ok(self.records().values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Record>, RecordStoreError> {
        Ok(self.records().get(id).cloned())
    }

    async fn find_latest_in_lineage(
        &self,
        product_id: &str,
    ) -> Result<Option<Record>, RecordStoreError> {
        Ok(self
            .records()
            .values()
            .filter(|record| record.product_id == product_id)
            .max_by_key(|record| record.product_version)
            .cloned())
    }

    async fn save(&self, record: &Record) -> Result<Record, RecordStoreError> {
        self.records().insert(record.id.clone(), record.clone());
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), RecordStoreError> {
        self.records().remove(id);
        Ok(())
    }

    async fn query(&self, predicates: &[Predicate]) -> Result<Vec<Record>, RecordStoreError> {
        Ok(self
            .records()
            .values()
            .filter(|record| predicates.iter().all(|predicate| predicate.matches(record)))
            .cloned()
            .collect())
    }
}
