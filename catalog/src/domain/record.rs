//! Record entity and the client payload shapes that feed it.
//!
//! The serde names on these types are the JSON wire contract shared with
//! the excluded HTTP layer (`productId`, `sourceDateStart`, accuracy field
//! casing, ...), so renames here are load-bearing. List-valued attributes
//! (`sensors`, `region`, `links`) arrive as structured lists on payloads
//! and are persisted on [`Record`] in their encoded delimited forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::footprint::Footprint;
use super::links::Link;
use super::sanitize::{Sanitize, sanitize_list, sanitize_opt, sanitize_string};

/// Record-kind tag carried through unchanged from the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// A 3D product metadata record.
    #[default]
    #[serde(rename = "RECORD_3D")]
    Record3D,
}

/// Enumerated product type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    /// Photo-realistic 3D mesh product.
    #[serde(rename = "3DPhotoRealistic")]
    PhotoRealistic3D,
}

impl ProductType {
    /// The wire/persisted spelling of the tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhotoRealistic3D => "3DPhotoRealistic",
        }
    }
}

/// Lifecycle status governing whether destructive operations are permitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    /// Not yet published; destructive operations are always permitted.
    #[default]
    #[serde(rename = "UNPUBLISHED")]
    Unpublished,
    /// Published; the flow-triggered deletion policy refuses to delete.
    #[serde(rename = "PUBLISHED")]
    Published,
}

impl ProductStatus {
    /// The wire/persisted spelling of the tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpublished => "UNPUBLISHED",
            Self::Published => "PUBLISHED",
        }
    }
}

/// Durable catalog record for one version of a 3D product.
///
/// ## Invariants
/// - `id` is globally unique and immutable after creation.
/// - `product_id` names the lineage; it equals `id` for version 1.
/// - `product_version` starts at 1 and increases by exactly 1 per lineage.
/// - `wkt_geometry` and `product_bounding_box` are derived from
///   `footprint` and never accepted from clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Globally unique identifier, client-supplied at creation.
    pub id: String,
    /// Lineage identifier shared by all versions of one product.
    pub product_id: String,
    /// Position of this record within its lineage, starting at 1.
    pub product_version: u32,
    /// Record-kind tag.
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Product display name.
    pub product_name: String,
    /// Enumerated product type.
    pub product_type: ProductType,
    /// Free-form description.
    pub description: Option<String>,
    /// When the product itself was created.
    pub creation_date: Option<DateTime<Utc>>,
    /// Start of the source data capture window.
    pub source_date_start: Option<DateTime<Utc>>,
    /// End of the source data capture window.
    pub source_date_end: Option<DateTime<Utc>>,
    /// Finest resolution in meters.
    pub min_resolution_meter: Option<f64>,
    /// Coarsest resolution in meters.
    pub max_resolution_meter: Option<f64>,
    /// Circular error, 90th percentile.
    #[serde(rename = "maxAccuracyCE90")]
    pub max_accuracy_ce90: f64,
    /// Absolute linear error, 90th percentile.
    #[serde(rename = "absoluteAccuracyLE90")]
    pub absolute_accuracy_le90: f64,
    /// Spherical error, 90th percentile.
    #[serde(rename = "accuracySE90")]
    pub accuracy_se90: f64,
    /// Relative spherical error, 90th percentile.
    #[serde(rename = "relativeAccuracySE90")]
    pub relative_accuracy_se90: f64,
    /// Visual accuracy figure.
    pub visual_accuracy: f64,
    /// Capturing sensors, persisted in encoded form.
    pub sensors: String,
    /// Covered regions, persisted in encoded form.
    pub region: String,
    /// Attached links, persisted in encoded form.
    pub links: String,
    /// Spatial extent polygon.
    pub footprint: Option<Footprint>,
    /// Well-known-text rendition derived from `footprint`.
    pub wkt_geometry: Option<String>,
    /// Bounding box derived from `footprint`.
    pub product_bounding_box: Option<String>,
    /// Lower bound of the product height range.
    pub height_range_from: Option<f64>,
    /// Upper bound of the product height range.
    pub height_range_to: Option<f64>,
    /// Spatial reference system identifier.
    pub srs_id: String,
    /// Spatial reference system display name.
    pub srs_name: String,
    /// Governed classification tag.
    pub classification: String,
    /// Producing system name.
    pub production_system: String,
    /// Producing system version.
    pub production_system_ver: String,
    /// Producer display name.
    pub producer_name: String,
    /// Minimum flight altitude during capture.
    pub min_flight_alt: Option<f64>,
    /// Maximum flight altitude during capture.
    pub max_flight_alt: Option<f64>,
    /// Geographic area display name.
    pub geographic_area: Option<String>,
    /// Source the product was derived from.
    pub product_source: Option<String>,
    /// Lifecycle status.
    pub product_status: ProductStatus,
}

/// Client payload for creating a record.
///
/// `productVersion`, `wktGeometry`, and `productBoundingBox` are absent by
/// design: versioning is resolved by the engine and geometry fields are
/// derived from `footprint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CreatePayload {
    /// Globally unique identifier for the new record.
    pub id: String,
    /// Existing lineage to join; absent to start a new lineage.
    #[serde(default)]
    pub product_id: Option<String>,
    /// Record-kind tag.
    #[serde(rename = "type", default)]
    pub kind: RecordKind,
    /// Product display name.
    pub product_name: String,
    /// Enumerated product type.
    pub product_type: ProductType,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the product itself was created.
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    /// Start of the source data capture window.
    #[serde(default)]
    pub source_date_start: Option<DateTime<Utc>>,
    /// End of the source data capture window.
    #[serde(default)]
    pub source_date_end: Option<DateTime<Utc>>,
    /// Finest resolution in meters.
    #[serde(default)]
    pub min_resolution_meter: Option<f64>,
    /// Coarsest resolution in meters.
    #[serde(default)]
    pub max_resolution_meter: Option<f64>,
    /// Circular error, 90th percentile.
    #[serde(rename = "maxAccuracyCE90")]
    pub max_accuracy_ce90: f64,
    /// Absolute linear error, 90th percentile.
    #[serde(rename = "absoluteAccuracyLE90")]
    pub absolute_accuracy_le90: f64,
    /// Spherical error, 90th percentile.
    #[serde(rename = "accuracySE90")]
    pub accuracy_se90: f64,
    /// Relative spherical error, 90th percentile.
    #[serde(rename = "relativeAccuracySE90")]
    pub relative_accuracy_se90: f64,
    /// Visual accuracy figure.
    pub visual_accuracy: f64,
    /// Capturing sensors.
    #[serde(default)]
    pub sensors: Vec<String>,
    /// Covered regions.
    #[serde(default)]
    pub region: Vec<String>,
    /// Attached links.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Spatial extent polygon.
    #[serde(default)]
    pub footprint: Option<Footprint>,
    /// Lower bound of the product height range.
    #[serde(default)]
    pub height_range_from: Option<f64>,
    /// Upper bound of the product height range.
    #[serde(default)]
    pub height_range_to: Option<f64>,
    /// Spatial reference system identifier.
    pub srs_id: String,
    /// Spatial reference system display name.
    pub srs_name: String,
    /// Governed classification tag.
    pub classification: String,
    /// Producing system name.
    pub production_system: String,
    /// Producing system version.
    pub production_system_ver: String,
    /// Producer display name.
    pub producer_name: String,
    /// Minimum flight altitude during capture.
    #[serde(default)]
    pub min_flight_alt: Option<f64>,
    /// Maximum flight altitude during capture.
    #[serde(default)]
    pub max_flight_alt: Option<f64>,
    /// Geographic area display name.
    #[serde(default)]
    pub geographic_area: Option<String>,
    /// Source the product was derived from.
    #[serde(default)]
    pub product_source: Option<String>,
    /// Initial lifecycle status.
    #[serde(default)]
    pub product_status: ProductStatus,
}

impl Sanitize for CreatePayload {
    fn sanitized(mut self) -> Self {
        sanitize_string(&mut self.id);
        sanitize_opt(&mut self.product_id);
        sanitize_string(&mut self.product_name);
        sanitize_opt(&mut self.description);
        sanitize_list(&mut self.sensors);
        sanitize_list(&mut self.region);
        sanitize_links(&mut self.links);
        sanitize_string(&mut self.srs_id);
        sanitize_string(&mut self.srs_name);
        sanitize_string(&mut self.classification);
        sanitize_string(&mut self.production_system);
        sanitize_string(&mut self.production_system_ver);
        sanitize_string(&mut self.producer_name);
        sanitize_opt(&mut self.geographic_area);
        sanitize_opt(&mut self.product_source);
        self
    }
}

/// Client payload for partially updating a record.
///
/// Absent fields leave the stored value unchanged; present fields replace
/// it wholesale. Geometry fields are re-derived only when `footprint` is
/// present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct UpdatePayload {
    /// Product display name.
    #[serde(default)]
    pub product_name: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the product itself was created.
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    /// Governed classification tag.
    #[serde(default)]
    pub classification: Option<String>,
    /// Finest resolution in meters.
    #[serde(default)]
    pub min_resolution_meter: Option<f64>,
    /// Coarsest resolution in meters.
    #[serde(default)]
    pub max_resolution_meter: Option<f64>,
    /// Circular error, 90th percentile.
    #[serde(rename = "maxAccuracyCE90", default)]
    pub max_accuracy_ce90: Option<f64>,
    /// Absolute linear error, 90th percentile.
    #[serde(rename = "absoluteAccuracyLE90", default)]
    pub absolute_accuracy_le90: Option<f64>,
    /// Spherical error, 90th percentile.
    #[serde(rename = "accuracySE90", default)]
    pub accuracy_se90: Option<f64>,
    /// Relative spherical error, 90th percentile.
    #[serde(rename = "relativeAccuracySE90", default)]
    pub relative_accuracy_se90: Option<f64>,
    /// Visual accuracy figure.
    #[serde(default)]
    pub visual_accuracy: Option<f64>,
    /// Capturing sensors.
    #[serde(default)]
    pub sensors: Option<Vec<String>>,
    /// Attached links.
    #[serde(default)]
    pub links: Option<Vec<Link>>,
    /// Spatial extent polygon.
    #[serde(default)]
    pub footprint: Option<Footprint>,
    /// Lower bound of the product height range.
    #[serde(default)]
    pub height_range_from: Option<f64>,
    /// Upper bound of the product height range.
    #[serde(default)]
    pub height_range_to: Option<f64>,
    /// Producer display name.
    #[serde(default)]
    pub producer_name: Option<String>,
    /// Minimum flight altitude during capture.
    #[serde(default)]
    pub min_flight_alt: Option<f64>,
    /// Maximum flight altitude during capture.
    #[serde(default)]
    pub max_flight_alt: Option<f64>,
    /// Geographic area display name.
    #[serde(default)]
    pub geographic_area: Option<String>,
}

impl Sanitize for UpdatePayload {
    fn sanitized(mut self) -> Self {
        sanitize_opt(&mut self.product_name);
        sanitize_opt(&mut self.description);
        sanitize_opt(&mut self.classification);
        if let Some(sensors) = &mut self.sensors {
            sanitize_list(sensors);
        }
        if let Some(links) = &mut self.links {
            sanitize_links(links);
        }
        sanitize_opt(&mut self.producer_name);
        sanitize_opt(&mut self.geographic_area);
        self
    }
}

/// Client payload for updating only the lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct UpdateStatusPayload {
    /// The new lifecycle status.
    pub product_status: ProductStatus,
}

fn sanitize_links(links: &mut [Link]) {
    for link in links {
        sanitize_opt(&mut link.name);
        sanitize_opt(&mut link.description);
        sanitize_string(&mut link.protocol);
        sanitize_string(&mut link.url);
    }
}
