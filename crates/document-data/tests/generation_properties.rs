//! Property-style tests for generated document records.
//!
//! These tests check the record invariants over a long generated run:
//! class codes, content shapes, asset placement, determinism, and lossless
//! JSON round-trips.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use chrono::NaiveDate;
use document_data::{
    DocumentCatalog, DocumentClass, DocumentContent, DocumentGenerator, DocumentRecord,
    TAG_SAMPLE_SIZE,
};
use regex::Regex;
use rstest::{fixture, rstest};

const RUN_LENGTH: usize = 250;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

#[fixture]
fn records() -> Vec<DocumentRecord> {
    DocumentGenerator::new(DocumentCatalog::pump_house(), 42, reference_date())
        .generate_batch(RUN_LENGTH)
}

#[rstest]
fn class_codes_come_from_the_fixed_set(records: Vec<DocumentRecord>) {
    let allowed = ["MR", "INV", "TD", "QR", "SP"];
    for record in &records {
        let json = serde_json::to_value(record).expect("serialize");
        let code = json["metadata"]["DCC"].as_str().expect("DCC is a string");
        assert!(allowed.contains(&code), "unexpected DCC {code}");
    }
}

#[rstest]
fn content_shape_matches_class(records: Vec<DocumentRecord>) {
    for record in &records {
        let shape_matches = match (record.class(), &record.content) {
            (DocumentClass::MaintenanceReport, DocumentContent::MaintenanceReport(_))
            | (DocumentClass::Invoice, DocumentContent::Invoice(_))
            | (
                DocumentClass::TechnicalDrawing
                | DocumentClass::QualityReport
                | DocumentClass::SparePartsList,
                DocumentContent::Generic(_),
            ) => true,
            _ => false,
        };
        assert!(shape_matches, "content shape mismatch: {record:?}");
    }
}

#[rstest]
fn assets_only_on_maintenance_reports_and_drawings(records: Vec<DocumentRecord>) {
    let catalog = DocumentCatalog::pump_house();
    for record in &records {
        let json = serde_json::to_value(record).expect("serialize");
        let asset_key_present = json["content"].get("asset").is_some();
        if record.class().references_asset() {
            let asset = record.asset().expect("asset present");
            assert!(
                catalog.assets().iter().any(|known| known == asset),
                "asset {asset} not in catalog"
            );
            assert!(asset_key_present);
        } else {
            assert!(record.asset().is_none());
            assert!(!asset_key_present, "unexpected asset: {record:?}");
        }
    }
}

#[rstest]
fn maintenance_materials_are_well_formed(records: Vec<DocumentRecord>) {
    let part_id = Regex::new(r"^PART-\d{4}$").expect("valid regex");
    let reports = records.iter().filter_map(|record| match &record.content {
        DocumentContent::MaintenanceReport(report) => Some(report),
        _ => None,
    });

    let mut seen = 0;
    for report in reports {
        seen += 1;
        assert_eq!(report.materials_used.len(), 2);
        for item in &report.materials_used {
            assert!(part_id.is_match(&item.part_id), "bad part id {}", item.part_id);
            assert!(item.quantity >= 1);
            assert!(!item.name.is_empty());
        }
    }
    assert!(seen > 0, "run should include maintenance reports");
}

#[rstest]
fn invoice_amounts_are_bounded_with_two_decimals(records: Vec<DocumentRecord>) {
    for record in &records {
        if let DocumentContent::Invoice(invoice) = &record.content {
            assert!((50.0..=5000.0).contains(&invoice.amount));
            let cents = invoice.amount * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6, "{}", invoice.amount);
        }
    }
}

#[rstest]
fn generic_tags_are_distinct_vocabulary_entries(records: Vec<DocumentRecord>) {
    let catalog = DocumentCatalog::pump_house();
    for record in &records {
        if let DocumentContent::Generic(generic) = &record.content {
            assert_eq!(generic.relevant_tags.len(), TAG_SAMPLE_SIZE);
            let mut tags = generic.relevant_tags.clone();
            tags.sort();
            tags.dedup();
            assert_eq!(tags.len(), TAG_SAMPLE_SIZE);
            assert!(tags.iter().all(|tag| catalog.tags().contains(tag)));
        }
    }
}

#[test]
fn fixed_seed_reproduces_the_same_run() {
    let first = records();
    let second = records();
    assert_eq!(first, second);
}

#[rstest]
fn records_round_trip_through_indented_json(records: Vec<DocumentRecord>) {
    for (index, mut record) in records.into_iter().enumerate() {
        record
            .assign_document_id(format!("AP7-ERROR-{:05}", index + 1))
            .expect("first assignment");
        let text = record.to_indented_json().expect("serialize");
        let parsed: DocumentRecord = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(parsed, record);
    }
}

#[test]
fn custom_catalog_drives_generation() {
    let catalog = DocumentCatalog::from_json(
        r#"{
            "areaCode": "BX2",
            "authors": ["Grace Hopper"],
            "assets": ["Pump B-201"],
            "maintenanceIssues": ["Cavitation"],
            "tags": ["pump", "valve", "pressure"]
        }"#,
    )
    .expect("valid catalog");
    let mut generator = DocumentGenerator::new(catalog, 5, reference_date());

    for record in generator.generate_batch(40) {
        assert_eq!(record.metadata.area_code, "BX2");
        assert_eq!(record.metadata.author, "Grace Hopper");
        if let Some(asset) = record.asset() {
            assert_eq!(asset, "Pump B-201");
        }
    }
}
