//! Query translation from sparse filters to conjunctive predicate sets.
//!
//! Filters are open-world: an absent field imposes no constraint, and an
//! empty filter matches every record. `productType` and `productId` match
//! case-insensitively to tolerate inconsistent input casing; their
//! predicates are appended after the base equality set so adapters apply
//! them as refinements of the equality conjunction.

use serde::{Deserialize, Serialize};

use super::record::Record;

/// Sparse field filter for record queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct RecordFilter {
    /// Exact record identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Lineage identifier, matched case-insensitively.
    #[serde(default)]
    pub product_id: Option<String>,
    /// Product display name.
    #[serde(default)]
    pub product_name: Option<String>,
    /// Product type tag, matched case-insensitively.
    #[serde(default)]
    pub product_type: Option<String>,
    /// Governed classification tag.
    #[serde(default)]
    pub classification: Option<String>,
    /// Producer display name.
    #[serde(default)]
    pub producer_name: Option<String>,
    /// Producing system name.
    #[serde(default)]
    pub production_system: Option<String>,
    /// Geographic area display name.
    #[serde(default)]
    pub geographic_area: Option<String>,
    /// Lifecycle status tag.
    #[serde(default)]
    pub product_status: Option<String>,
    /// Spatial reference system identifier.
    #[serde(default)]
    pub srs_id: Option<String>,
}

/// A single predicate in the conjunction handed to the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Exact string equality on a record field.
    Equals {
        /// Wire name of the record field.
        field: &'static str,
        /// Value the field must equal.
        value: String,
    },
    /// Case-insensitive string equality on a record field.
    EqualsIgnoreCase {
        /// Wire name of the record field.
        field: &'static str,
        /// Value the field must equal up to ASCII case.
        value: String,
    },
}

impl Predicate {
    /// Whether a record satisfies this predicate.
    ///
    /// Fields the record does not carry (an absent optional value or an
    /// unknown field name) never match.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Equals { field, value } => {
                filter_field(record, field).is_some_and(|found| found == *value)
            }
            Self::EqualsIgnoreCase { field, value } => filter_field(record, field)
                .is_some_and(|found| found.eq_ignore_ascii_case(value)),
        }
    }
}

/// Translate a sparse filter into its conjunctive predicate set.
///
/// # Examples
/// ```
/// use catalog::domain::{Predicate, RecordFilter};
/// use catalog::domain::query::translate;
///
/// let filter = RecordFilter {
///     product_type: Some("3dphotorealistic".to_owned()),
///     ..RecordFilter::default()
/// };
/// assert_eq!(
///     translate(&filter),
///     vec![Predicate::EqualsIgnoreCase {
///         field: "productType",
///         value: "3dphotorealistic".to_owned(),
///     }]
/// );
/// ```
pub fn translate(filter: &RecordFilter) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    let equality_fields = [
        ("id", &filter.id),
        ("productName", &filter.product_name),
        ("classification", &filter.classification),
        ("producerName", &filter.producer_name),
        ("productionSystem", &filter.production_system),
        ("geographicArea", &filter.geographic_area),
        ("productStatus", &filter.product_status),
        ("srsId", &filter.srs_id),
    ];
    for (field, value) in equality_fields {
        if let Some(value) = value {
            predicates.push(Predicate::Equals {
                field,
                value: value.clone(),
            });
        }
    }

    // Case-insensitive refinements go after the equality set.
    if let Some(value) = &filter.product_type {
        predicates.push(Predicate::EqualsIgnoreCase {
            field: "productType",
            value: value.clone(),
        });
    }
    if let Some(value) = &filter.product_id {
        predicates.push(Predicate::EqualsIgnoreCase {
            field: "productId",
            value: value.clone(),
        });
    }

    predicates
}

fn filter_field(record: &Record, field: &str) -> Option<String> {
    match field {
        "id" => Some(record.id.clone()),
        "productId" => Some(record.product_id.clone()),
        "productName" => Some(record.product_name.clone()),
        "productType" => Some(record.product_type.as_str().to_owned()),
        "classification" => Some(record.classification.clone()),
        "producerName" => Some(record.producer_name.clone()),
        "productionSystem" => Some(record.production_system.clone()),
        "geographicArea" => record.geographic_area.clone(),
        "productStatus" => Some(record.product_status.as_str().to_owned()),
        "srsId" => Some(record.srs_id.clone()),
        _ => None,
    }
}
