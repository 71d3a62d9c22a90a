//! Shared builders for unit tests across the domain modules.

use chrono::{TimeZone, Utc};

use super::footprint::Footprint;
use super::links::{Link, encode_links, encode_string_list};
use super::record::{CreatePayload, ProductStatus, ProductType, Record, RecordKind};

/// A closed unit-square footprint around the origin.
pub(crate) fn square_footprint() -> Footprint {
    Footprint::new(vec![vec![
        [0.0, 0.0],
        [0.0, 1.0],
        [1.0, 1.0],
        [1.0, 0.0],
        [0.0, 0.0],
    ]])
    .expect("closed square ring")
}

/// Links carrying one display link and one deletable model locator.
pub(crate) fn fixture_links(model_id: &str) -> Vec<Link> {
    vec![
        Link {
            name: Some("preview".to_owned()),
            description: Some("viewer link".to_owned()),
            protocol: "WMTS".to_owned(),
            url: "http://maps.test/wmts".to_owned(),
        },
        Link {
            name: None,
            description: None,
            protocol: "3D_LAYER".to_owned(),
            url: format!("http://catalog.test/{model_id}/tileset.json"),
        },
    ]
}

/// A complete, valid create payload starting a new lineage.
pub(crate) fn fixture_create_payload(id: &str) -> CreatePayload {
    CreatePayload {
        id: id.to_owned(),
        product_id: None,
        kind: RecordKind::Record3D,
        product_name: "city model".to_owned(),
        product_type: ProductType::PhotoRealistic3D,
        description: Some("downtown mesh".to_owned()),
        creation_date: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid timestamp")),
        source_date_start: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid timestamp")),
        source_date_end: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("valid timestamp")),
        min_resolution_meter: Some(0.5),
        max_resolution_meter: Some(2.0),
        max_accuracy_ce90: 3.0,
        absolute_accuracy_le90: 2.5,
        accuracy_se90: 2.0,
        relative_accuracy_se90: 1.5,
        visual_accuracy: 1.0,
        sensors: vec!["OTHER".to_owned()],
        region: vec!["north".to_owned()],
        links: fixture_links(id),
        footprint: Some(square_footprint()),
        height_range_from: Some(0.0),
        height_range_to: Some(120.0),
        srs_id: "4326".to_owned(),
        srs_name: "WGS84".to_owned(),
        classification: "5".to_owned(),
        production_system: "production-system".to_owned(),
        production_system_ver: "1.2".to_owned(),
        producer_name: "producer".to_owned(),
        min_flight_alt: Some(100.0),
        max_flight_alt: Some(300.0),
        geographic_area: Some("north".to_owned()),
        product_source: Some("/mnt/models/city".to_owned()),
        product_status: ProductStatus::Unpublished,
    }
}

/// A persisted version-1 record for a single-record lineage.
pub(crate) fn fixture_record(id: &str) -> Record {
    let footprint = square_footprint();
    Record {
        id: id.to_owned(),
        product_id: id.to_owned(),
        product_version: 1,
        kind: RecordKind::Record3D,
        product_name: "city model".to_owned(),
        product_type: ProductType::PhotoRealistic3D,
        description: Some("downtown mesh".to_owned()),
        creation_date: None,
        source_date_start: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid timestamp")),
        source_date_end: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("valid timestamp")),
        min_resolution_meter: Some(0.5),
        max_resolution_meter: Some(2.0),
        max_accuracy_ce90: 3.0,
        absolute_accuracy_le90: 2.5,
        accuracy_se90: 2.0,
        relative_accuracy_se90: 1.5,
        visual_accuracy: 1.0,
        sensors: encode_string_list(&["OTHER".to_owned()]),
        region: encode_string_list(&["north".to_owned()]),
        links: encode_links(&fixture_links(id)),
        wkt_geometry: Some(footprint.to_wkt()),
        product_bounding_box: Some(footprint.bounding_box()),
        footprint: Some(footprint),
        height_range_from: Some(0.0),
        height_range_to: Some(120.0),
        srs_id: "4326".to_owned(),
        srs_name: "WGS84".to_owned(),
        classification: "5".to_owned(),
        production_system: "production-system".to_owned(),
        production_system_ver: "1.2".to_owned(),
        producer_name: "producer".to_owned(),
        min_flight_alt: Some(100.0),
        max_flight_alt: Some(300.0),
        geographic_area: Some("north".to_owned()),
        product_source: Some("/mnt/models/city".to_owned()),
        product_status: ProductStatus::Unpublished,
    }
}
