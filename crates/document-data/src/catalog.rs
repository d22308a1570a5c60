//! Document classes and the immutable generation catalog.
//!
//! The catalog holds every fixed list the generator draws from. It is owned by
//! the generator rather than living in process-wide statics, so different
//! generators can run against different sites.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Number of tags sampled (without replacement) for generic documents.
pub const TAG_SAMPLE_SIZE: usize = 3;

const PUMP_HOUSE_AREA_CODE: &str = "AP7";
const PUMP_HOUSE_AREA_DESCRIPTION: &str = "AP7";
const PUMP_HOUSE_AUTHORS: [&str; 6] = [
    "Alice Smith",
    "Bob Johnson",
    "Charlie Brown",
    "Diana Prince",
    "Eve Davis",
    "Frank White",
];
const PUMP_HOUSE_ASSETS: [&str; 3] = ["Pump P-101", "Pump P-102", "Pump P-103"];
const PUMP_HOUSE_ISSUES: [&str; 5] = [
    "Overheated bearing",
    "Leaking seal",
    "Motor failure",
    "Vibration analysis required",
    "Routine inspection",
];
const PUMP_HOUSE_TAGS: [&str; 7] = [
    "pump",
    "motor",
    "maintenance",
    "technical",
    "drawing",
    "report",
    "fluid",
];

/// Document class code (DCC) classifying a document's type.
///
/// Serialises as the short code (`"MR"`, `"INV"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentClass {
    /// Maintenance report for a pump asset.
    #[serde(rename = "MR")]
    MaintenanceReport,
    /// Supplier invoice.
    #[serde(rename = "INV")]
    Invoice,
    /// Technical drawing for a pump asset.
    #[serde(rename = "TD")]
    TechnicalDrawing,
    /// Quality report.
    #[serde(rename = "QR")]
    QualityReport,
    /// Spare parts list.
    #[serde(rename = "SP")]
    SparePartsList,
}

impl DocumentClass {
    /// Every document class, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::MaintenanceReport,
        Self::Invoice,
        Self::TechnicalDrawing,
        Self::QualityReport,
        Self::SparePartsList,
    ];

    /// Returns the short class code.
    ///
    /// # Examples
    ///
    /// ```
    /// use document_data::DocumentClass;
    ///
    /// assert_eq!(DocumentClass::Invoice.code(), "INV");
    /// ```
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MaintenanceReport => "MR",
            Self::Invoice => "INV",
            Self::TechnicalDrawing => "TD",
            Self::QualityReport => "QR",
            Self::SparePartsList => "SP",
        }
    }

    /// Returns the human-readable class description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::MaintenanceReport => "Maintenance Report",
            Self::Invoice => "Invoice",
            Self::TechnicalDrawing => "Technical Drawing",
            Self::QualityReport => "Quality Report",
            Self::SparePartsList => "Spare Parts List",
        }
    }

    /// Returns `true` for classes that reference a pump asset.
    #[must_use]
    pub const fn references_asset(self) -> bool {
        matches!(self, Self::MaintenanceReport | Self::TechnicalDrawing)
    }
}

impl fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Fixed lists the generator samples from.
///
/// # Example
///
/// ```
/// use document_data::DocumentCatalog;
///
/// let catalog = DocumentCatalog::pump_house();
/// assert_eq!(catalog.area_code(), "AP7");
/// assert_eq!(catalog.assets().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCatalog {
    area_code: String,
    area_code_description: String,
    authors: Vec<String>,
    assets: Vec<String>,
    maintenance_issues: Vec<String>,
    tags: Vec<String>,
}

impl DocumentCatalog {
    /// Returns the built-in pump-house catalog.
    #[must_use]
    pub fn pump_house() -> Self {
        Self {
            area_code: PUMP_HOUSE_AREA_CODE.to_owned(),
            area_code_description: PUMP_HOUSE_AREA_DESCRIPTION.to_owned(),
            authors: owned(&PUMP_HOUSE_AUTHORS),
            assets: owned(&PUMP_HOUSE_ASSETS),
            maintenance_issues: owned(&PUMP_HOUSE_ISSUES),
            tags: owned(&PUMP_HOUSE_TAGS),
        }
    }

    /// Parses a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if:
    /// - The JSON is malformed or missing required fields
    /// - The area code is blank
    /// - Any list is empty or holds a blank entry
    /// - The tag vocabulary is smaller than [`TAG_SAMPLE_SIZE`] or repeats a tag
    ///
    /// # Example
    ///
    /// ```
    /// use document_data::DocumentCatalog;
    ///
    /// let json = r#"{
    ///     "areaCode": "BX2",
    ///     "areaCodeDescription": "Booster station",
    ///     "authors": ["Grace Hopper"],
    ///     "assets": ["Pump B-201"],
    ///     "maintenanceIssues": ["Cavitation"],
    ///     "tags": ["pump", "valve", "pressure"]
    /// }"#;
    ///
    /// let catalog = DocumentCatalog::from_json(json).expect("valid catalog");
    /// assert_eq!(catalog.area_code(), "BX2");
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawDocumentCatalog =
            serde_json::from_str(json).map_err(|e| CatalogError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|e| CatalogError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawDocumentCatalog) -> Result<Self, CatalogError> {
        if raw.area_code.trim().is_empty() {
            return Err(CatalogError::BlankAreaCode);
        }

        validate_entries("authors", &raw.authors)?;
        validate_entries("assets", &raw.assets)?;
        validate_entries("maintenanceIssues", &raw.maintenance_issues)?;
        validate_entries("tags", &raw.tags)?;

        if raw.tags.len() < TAG_SAMPLE_SIZE {
            return Err(CatalogError::TooFewTags {
                required: TAG_SAMPLE_SIZE,
                actual: raw.tags.len(),
            });
        }

        if let Some(tag) = first_duplicate(&raw.tags) {
            return Err(CatalogError::DuplicateTag { tag });
        }

        let area_code_description = raw
            .area_code_description
            .unwrap_or_else(|| raw.area_code.clone());

        Ok(Self {
            area_code: raw.area_code,
            area_code_description,
            authors: raw.authors,
            assets: raw.assets,
            maintenance_issues: raw.maintenance_issues,
            tags: raw.tags,
        })
    }

    /// Returns the area code stamped on every document.
    #[must_use]
    pub fn area_code(&self) -> &str {
        &self.area_code
    }

    /// Returns the area code description.
    #[must_use]
    pub fn area_code_description(&self) -> &str {
        &self.area_code_description
    }

    /// Returns the author roster.
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Returns the asset catalog.
    #[must_use]
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Returns the maintenance issue catalog.
    #[must_use]
    pub fn maintenance_issues(&self) -> &[String] {
        &self.maintenance_issues
    }

    /// Returns the tag vocabulary.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Default for DocumentCatalog {
    fn default() -> Self {
        Self::pump_house()
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn validate_entries(field: &'static str, entries: &[String]) -> Result<(), CatalogError> {
    if entries.is_empty() {
        return Err(CatalogError::EmptyField { field });
    }
    match entries.iter().position(|entry| entry.trim().is_empty()) {
        Some(index) => Err(CatalogError::BlankEntry { field, index }),
        None => Ok(()),
    }
}

fn first_duplicate(entries: &[String]) -> Option<String> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .iter()
        .find(|entry| !seen.insert(entry.as_str()))
        .cloned()
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawDocumentCatalog {
    area_code: String,
    area_code_description: Option<String>,
    authors: Vec<String>,
    assets: Vec<String>,
    maintenance_issues: Vec<String>,
    tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const VALID_JSON: &str = r#"{
        "areaCode": "BX2",
        "areaCodeDescription": "Booster station",
        "authors": ["Grace Hopper", "Alan Turing"],
        "assets": ["Pump B-201"],
        "maintenanceIssues": ["Cavitation"],
        "tags": ["pump", "valve", "pressure", "seal"]
    }"#;

    #[test]
    fn pump_house_catalog_matches_site_lists() {
        let catalog = DocumentCatalog::pump_house();

        assert_eq!(catalog.area_code(), "AP7");
        assert_eq!(catalog.area_code_description(), "AP7");
        assert_eq!(catalog.authors().len(), 6);
        assert_eq!(catalog.assets(), ["Pump P-101", "Pump P-102", "Pump P-103"]);
        assert_eq!(catalog.maintenance_issues().len(), 5);
        assert_eq!(catalog.tags().len(), 7);
    }

    #[test]
    fn parses_valid_catalog() {
        let catalog = DocumentCatalog::from_json(VALID_JSON).expect("valid catalog");

        assert_eq!(catalog.area_code(), "BX2");
        assert_eq!(catalog.area_code_description(), "Booster station");
        assert_eq!(catalog.authors().len(), 2);
        assert_eq!(catalog.tags().len(), 4);
    }

    #[test]
    fn description_defaults_to_area_code() {
        let json = r#"{
            "areaCode": "BX2",
            "authors": ["Grace Hopper"],
            "assets": ["Pump B-201"],
            "maintenanceIssues": ["Cavitation"],
            "tags": ["pump", "valve", "pressure"]
        }"#;

        let catalog = DocumentCatalog::from_json(json).expect("valid catalog");
        assert_eq!(catalog.area_code_description(), "BX2");
    }

    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_authors(
        r#"{"areaCode": "A", "assets": ["x"], "maintenanceIssues": ["y"], "tags": ["a", "b", "c"]}"#
    )]
    #[case::unknown_field(
        r#"{"areaCode": "A", "authors": ["a"], "assets": ["x"], "maintenanceIssues": ["y"], "tags": ["a", "b", "c"], "extra": 1}"#
    )]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = DocumentCatalog::from_json(json);
        assert!(matches!(result, Err(CatalogError::ParseError { .. })));
    }

    #[rstest]
    #[case::blank_area_code(
        r#"{"areaCode": "  ", "authors": ["a"], "assets": ["x"], "maintenanceIssues": ["y"], "tags": ["a", "b", "c"]}"#,
        CatalogError::BlankAreaCode
    )]
    #[case::empty_authors(
        r#"{"areaCode": "A", "authors": [], "assets": ["x"], "maintenanceIssues": ["y"], "tags": ["a", "b", "c"]}"#,
        CatalogError::EmptyField { field: "authors" }
    )]
    #[case::empty_assets(
        r#"{"areaCode": "A", "authors": ["a"], "assets": [], "maintenanceIssues": ["y"], "tags": ["a", "b", "c"]}"#,
        CatalogError::EmptyField { field: "assets" }
    )]
    #[case::blank_issue(
        r#"{"areaCode": "A", "authors": ["a"], "assets": ["x"], "maintenanceIssues": ["y", ""], "tags": ["a", "b", "c"]}"#,
        CatalogError::BlankEntry { field: "maintenanceIssues", index: 1 }
    )]
    #[case::too_few_tags(
        r#"{"areaCode": "A", "authors": ["a"], "assets": ["x"], "maintenanceIssues": ["y"], "tags": ["a", "b"]}"#,
        CatalogError::TooFewTags { required: 3, actual: 2 }
    )]
    #[case::duplicate_tag(
        r#"{"areaCode": "A", "authors": ["a"], "assets": ["x"], "maintenanceIssues": ["y"], "tags": ["a", "b", "a"]}"#,
        CatalogError::DuplicateTag { tag: "a".to_owned() }
    )]
    fn rejects_invalid_catalog(#[case] json: &str, #[case] expected: CatalogError) {
        let result = DocumentCatalog::from_json(json);
        assert_eq!(result, Err(expected));
    }

    #[rstest]
    #[case(DocumentClass::MaintenanceReport, "MR", "Maintenance Report", true)]
    #[case(DocumentClass::Invoice, "INV", "Invoice", false)]
    #[case(DocumentClass::TechnicalDrawing, "TD", "Technical Drawing", true)]
    #[case(DocumentClass::QualityReport, "QR", "Quality Report", false)]
    #[case(DocumentClass::SparePartsList, "SP", "Spare Parts List", false)]
    fn document_class_codes_and_descriptions(
        #[case] class: DocumentClass,
        #[case] code: &str,
        #[case] description: &str,
        #[case] references_asset: bool,
    ) {
        assert_eq!(class.code(), code);
        assert_eq!(class.description(), description);
        assert_eq!(class.references_asset(), references_asset);
        let json = serde_json::to_string(&class).expect("serialize");
        assert_eq!(json, format!("\"{code}\""));
    }
}
