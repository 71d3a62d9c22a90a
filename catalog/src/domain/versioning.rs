//! Lineage resolution for the per-product version chain.
//!
//! A lineage is the set of record versions sharing a `productId`. Version
//! numbers start at 1 and increase by exactly 1 per record; "no version
//! yet" is reported as 0 by [`next_version`] and is distinct from "version
//! 1 exists". The resolution read and the subsequent write are separate
//! store operations, so concurrent creates in one lineage race and rely on
//! the store's constraints to surface conflicts.

use super::ports::{RecordStore, RecordStoreError};

/// The lineage slot a new record will occupy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage {
    /// Lineage identifier shared by all versions of the product.
    pub product_id: String,
    /// Version number to assign to the new record.
    pub product_version: u32,
}

/// Highest version currently stored for a lineage, 0 when it has none.
pub async fn next_version<S>(store: &S, product_id: &str) -> Result<u32, RecordStoreError>
where
    S: RecordStore + ?Sized,
{
    Ok(store
        .find_latest_in_lineage(product_id)
        .await?
        .map_or(0, |record| record.product_version))
}

/// Decide which lineage a create payload joins and at which version.
///
/// A payload without a `productId` starts a new lineage named after its own
/// `id`, at version 1. A payload carrying a `productId` joins that lineage
/// one past its current highest version.
pub async fn resolve_lineage<S>(
    store: &S,
    id: &str,
    product_id: Option<&str>,
) -> Result<Lineage, RecordStoreError>
where
    S: RecordStore + ?Sized,
{
    match product_id {
        None => Ok(Lineage {
            product_id: id.to_owned(),
            product_version: 1,
        }),
        Some(product_id) => Ok(Lineage {
            product_id: product_id.to_owned(),
            product_version: next_version(store, product_id).await? + 1,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockRecordStore;
    use crate::domain::test_fixtures::fixture_record;

    #[tokio::test]
    async fn next_version_is_zero_for_empty_lineage() {
        let mut store = MockRecordStore::new();
        store
            .expect_find_latest_in_lineage()
            .times(1)
            .return_once(|_| Ok(None));

        let version = next_version(&store, "unknown").await.expect("lookup succeeds");
        assert_eq!(version, 0);
    }

    #[tokio::test]
    async fn next_version_reports_the_highest_stored_version() {
        let mut latest = fixture_record("r2");
        latest.product_id = "lineage".to_owned();
        latest.product_version = 2;

        let mut store = MockRecordStore::new();
        store
            .expect_find_latest_in_lineage()
            .withf(|product_id| product_id == "lineage")
            .times(1)
            .return_once(move |_| Ok(Some(latest)));

        let version = next_version(&store, "lineage").await.expect("lookup succeeds");
        assert_eq!(version, 2);
    }

    #[tokio::test]
    async fn payload_without_product_id_starts_a_new_lineage() {
        let store = MockRecordStore::new();

        let lineage = resolve_lineage(&store, "new-id", None)
            .await
            .expect("resolution succeeds");
        assert_eq!(
            lineage,
            Lineage {
                product_id: "new-id".to_owned(),
                product_version: 1,
            }
        );
    }

    #[tokio::test]
    async fn payload_with_product_id_joins_the_lineage_one_past_its_tip() {
        let mut latest = fixture_record("r2");
        latest.product_id = "lineage".to_owned();
        latest.product_version = 2;

        let mut store = MockRecordStore::new();
        store
            .expect_find_latest_in_lineage()
            .times(1)
            .return_once(move |_| Ok(Some(latest)));

        let lineage = resolve_lineage(&store, "new-id", Some("lineage"))
            .await
            .expect("resolution succeeds");
        assert_eq!(
            lineage,
            Lineage {
                product_id: "lineage".to_owned(),
                product_version: 3,
            }
        );
    }
}
