//! Generated document record types.
//!
//! These types define the JSON payload submitted to the content server and
//! written to local artifacts. Field names on the wire follow the content
//! server's document form, so metadata keys contain spaces.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::catalog::DocumentClass;
use crate::error::AssignmentError;

const ARTIFACT_INDENT: &[u8] = b"    ";

/// A synthesized document: metadata plus class-specific content.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use document_data::{DocumentCatalog, DocumentGenerator};
///
/// let reference = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
/// let mut generator = DocumentGenerator::new(DocumentCatalog::pump_house(), 42, reference);
/// let mut record = generator.generate();
///
/// record.assign_document_id("AP7-000123").expect("first assignment");
/// assert_eq!(record.document_id(), Some("AP7-000123"));
/// assert!(record.assign_document_id("AP7-000124").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Classification and authorship metadata.
    pub metadata: DocumentMetadata,
    /// Body content whose shape depends on the document class.
    pub content: DocumentContent,
}

impl DocumentRecord {
    /// Returns the document class.
    #[must_use]
    pub const fn class(&self) -> DocumentClass {
        self.metadata.dcc
    }

    /// Returns the pump asset referenced by the content, if any.
    #[must_use]
    pub fn asset(&self) -> Option<&str> {
        match &self.content {
            DocumentContent::MaintenanceReport(report) => Some(report.asset.as_str()),
            DocumentContent::Invoice(_) => None,
            DocumentContent::Generic(generic) => generic.asset.as_deref(),
        }
    }

    /// Returns the assigned document identifier, if any.
    #[must_use]
    pub fn document_id(&self) -> Option<&str> {
        self.metadata.document_id.as_deref()
    }

    /// Assigns the document identifier.
    ///
    /// An identifier can be assigned exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::AlreadyAssigned`] if the record already has
    /// an identifier, or [`AssignmentError::BlankIdentifier`] if `id` is blank.
    pub fn assign_document_id(&mut self, id: impl Into<String>) -> Result<(), AssignmentError> {
        if let Some(existing) = &self.metadata.document_id {
            return Err(AssignmentError::AlreadyAssigned {
                existing: existing.clone(),
            });
        }
        let document_id: String = id.into();
        if document_id.trim().is_empty() {
            return Err(AssignmentError::BlankIdentifier);
        }
        self.metadata.document_id = Some(document_id);
        Ok(())
    }

    /// Serialises the record as JSON indented with four spaces.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialisation fails.
    pub fn to_indented_json(&self) -> Result<String, serde_json::Error> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(ARTIFACT_INDENT);
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(|err| serde::ser::Error::custom(err.to_string()))
    }
}

/// Document metadata as submitted to the content server.
///
/// `Document ID` is `null` until the record has been submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Plant area code.
    #[serde(rename = "Area Code")]
    pub area_code: String,
    /// Plant area description.
    #[serde(rename = "Area Code Description")]
    pub area_code_description: String,
    /// Document class code.
    #[serde(rename = "DCC")]
    pub dcc: DocumentClass,
    /// Document class description.
    #[serde(rename = "DCC Description")]
    pub dcc_description: String,
    /// Document title.
    #[serde(rename = "Document Title")]
    pub title: String,
    /// Document author.
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Document ID")]
    document_id: Option<String>,
}

impl DocumentMetadata {
    pub(crate) fn unassigned(
        area_code: String,
        area_code_description: String,
        dcc: DocumentClass,
        title: String,
        author: String,
    ) -> Self {
        Self {
            area_code,
            area_code_description,
            dcc,
            dcc_description: dcc.description().to_owned(),
            title,
            author,
            document_id: None,
        }
    }
}

/// Class-specific body content.
///
/// Serialised untagged: the variant is recognised by its field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentContent {
    /// Maintenance report body (`MR`).
    MaintenanceReport(MaintenanceReport),
    /// Invoice body (`INV`).
    Invoice(Invoice),
    /// Summary-and-tags body used by every other class.
    Generic(GenericContent),
}

/// Maintenance report content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaintenanceReport {
    /// Serviced pump asset.
    pub asset: String,
    /// Date the maintenance took place.
    pub date: NaiveDate,
    /// Issue that triggered the maintenance.
    pub issue: String,
    /// Free-text description of the work done.
    pub actions_taken: String,
    /// Technician who performed the work.
    pub technician: String,
    /// Parts consumed.
    pub materials_used: Vec<MaterialLineItem>,
}

/// One consumed part on a maintenance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialLineItem {
    /// Part number in `PART-####` form.
    pub part_id: String,
    /// Part name.
    pub name: String,
    /// Quantity used; always at least one.
    pub quantity: u32,
}

/// Invoice content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Invoice {
    /// Supplier name.
    pub vendor_name: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Invoice total, two decimal places.
    pub amount: f64,
}

/// Generic content for technical drawings, quality reports, and spare
/// parts lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenericContent {
    /// Multi-sentence summary.
    pub summary: String,
    /// Distinct tags drawn from the catalog vocabulary.
    pub relevant_tags: Vec<String>,
    /// Drawn pump asset; only present on technical drawings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}
