//! Assembly of durable records from validated client payloads.
//!
//! Assembly runs after validation and never fails: payloads are sanitised,
//! list-valued fields are folded into their encoded forms, and the derived
//! geometry pair (`wktGeometry`, `productBoundingBox`) is computed from the
//! footprint. Clients cannot supply derived fields; they exist only as
//! outputs of this module.

use super::links::{encode_links, encode_string_list};
use super::record::{CreatePayload, Record, UpdatePayload, UpdateStatusPayload};
use super::sanitize::Sanitize;
use super::versioning::Lineage;

/// Build the durable record for a validated create payload.
///
/// The lineage decides `productId` and `productVersion`; everything else
/// comes from the payload, sanitised and with lists encoded. Geometry
/// derivation happens here and nowhere else on the create path.
pub fn assemble_create(payload: CreatePayload, lineage: Lineage) -> Record {
    let payload = payload.sanitized();
    let (wkt_geometry, product_bounding_box) = payload
        .footprint
        .as_ref()
        .map(|footprint| (footprint.to_wkt(), footprint.bounding_box()))
        .unzip();

    Record {
        id: payload.id,
        product_id: lineage.product_id,
        product_version: lineage.product_version,
        kind: payload.kind,
        product_name: payload.product_name,
        product_type: payload.product_type,
        description: payload.description,
        creation_date: payload.creation_date,
        source_date_start: payload.source_date_start,
        source_date_end: payload.source_date_end,
        min_resolution_meter: payload.min_resolution_meter,
        max_resolution_meter: payload.max_resolution_meter,
        max_accuracy_ce90: payload.max_accuracy_ce90,
        absolute_accuracy_le90: payload.absolute_accuracy_le90,
        accuracy_se90: payload.accuracy_se90,
        relative_accuracy_se90: payload.relative_accuracy_se90,
        visual_accuracy: payload.visual_accuracy,
        sensors: encode_string_list(&payload.sensors),
        region: encode_string_list(&payload.region),
        links: encode_links(&payload.links),
        footprint: payload.footprint,
        wkt_geometry,
        product_bounding_box,
        height_range_from: payload.height_range_from,
        height_range_to: payload.height_range_to,
        srs_id: payload.srs_id,
        srs_name: payload.srs_name,
        classification: payload.classification,
        production_system: payload.production_system,
        production_system_ver: payload.production_system_ver,
        producer_name: payload.producer_name,
        min_flight_alt: payload.min_flight_alt,
        max_flight_alt: payload.max_flight_alt,
        geographic_area: payload.geographic_area,
        product_source: payload.product_source,
        product_status: payload.product_status,
    }
}

/// Merge a partial update into a stored record.
///
/// Present payload fields replace the stored value wholesale; absent
/// fields leave it untouched. Identity fields (`id`, `productId`,
/// `productVersion`) and the lifecycle status are never touched here.
/// Geometry is re-derived only when the payload carries a footprint, so an
/// update without one preserves the stored geometry exactly.
pub fn apply_update(mut record: Record, payload: UpdatePayload) -> Record {
    let payload = payload.sanitized();

    if let Some(product_name) = payload.product_name {
        record.product_name = product_name;
    }
    if payload.description.is_some() {
        record.description = payload.description;
    }
    if payload.creation_date.is_some() {
        record.creation_date = payload.creation_date;
    }
    if let Some(classification) = payload.classification {
        record.classification = classification;
    }
    if payload.min_resolution_meter.is_some() {
        record.min_resolution_meter = payload.min_resolution_meter;
    }
    if payload.max_resolution_meter.is_some() {
        record.max_resolution_meter = payload.max_resolution_meter;
    }
    if let Some(max_accuracy_ce90) = payload.max_accuracy_ce90 {
        record.max_accuracy_ce90 = max_accuracy_ce90;
    }
    if let Some(absolute_accuracy_le90) = payload.absolute_accuracy_le90 {
        record.absolute_accuracy_le90 = absolute_accuracy_le90;
    }
    if let Some(accuracy_se90) = payload.accuracy_se90 {
        record.accuracy_se90 = accuracy_se90;
    }
    if let Some(relative_accuracy_se90) = payload.relative_accuracy_se90 {
        record.relative_accuracy_se90 = relative_accuracy_se90;
    }
    if let Some(visual_accuracy) = payload.visual_accuracy {
        record.visual_accuracy = visual_accuracy;
    }
    if let Some(sensors) = payload.sensors {
        record.sensors = encode_string_list(&sensors);
    }
    if let Some(links) = payload.links {
        record.links = encode_links(&links);
    }
    if let Some(footprint) = payload.footprint {
        record.wkt_geometry = Some(footprint.to_wkt());
        record.product_bounding_box = Some(footprint.bounding_box());
        record.footprint = Some(footprint);
    }
    if payload.height_range_from.is_some() {
        record.height_range_from = payload.height_range_from;
    }
    if payload.height_range_to.is_some() {
        record.height_range_to = payload.height_range_to;
    }
    if let Some(producer_name) = payload.producer_name {
        record.producer_name = producer_name;
    }
    if payload.min_flight_alt.is_some() {
        record.min_flight_alt = payload.min_flight_alt;
    }
    if payload.max_flight_alt.is_some() {
        record.max_flight_alt = payload.max_flight_alt;
    }
    if payload.geographic_area.is_some() {
        record.geographic_area = payload.geographic_area;
    }

    record
}

/// Replace only the lifecycle status of a stored record.
pub fn apply_status(mut record: Record, payload: UpdateStatusPayload) -> Record {
    record.product_status = payload.product_status;
    record
}
