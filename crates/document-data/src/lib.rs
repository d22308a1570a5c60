//! Deterministic fake document generation for content server loading.
//!
//! This crate produces believable, reproducible pump-house document records
//! (maintenance reports, invoices, technical drawings, quality reports, and
//! spare parts lists) from a seeded random corpus. It performs no I/O beyond
//! optionally reading a custom catalog file, and it knows nothing about the
//! content server the records are eventually submitted to.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - An immutable [`DocumentCatalog`] of areas, authors, assets, issues, and
//!   tags, with a built-in pump-house default and JSON loading
//! - Deterministic record generation using a named seed and reference date
//! - Record types whose JSON form matches the content server payload
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use document_data::{DocumentCatalog, DocumentGenerator};
//!
//! let reference = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
//! let mut generator = DocumentGenerator::new(DocumentCatalog::pump_house(), 42, reference);
//! let records = generator.generate_batch(3);
//!
//! assert_eq!(records.len(), 3);
//! assert!(records.iter().all(|record| record.document_id().is_none()));
//! ```

mod catalog;
mod corpus;
mod error;
mod generator;
mod record;

pub use catalog::{DocumentCatalog, DocumentClass, TAG_SAMPLE_SIZE};
pub use corpus::RandomCorpus;
pub use error::{AssignmentError, CatalogError};
pub use generator::{DEFAULT_SEED, DocumentGenerator};
pub use record::{
    DocumentContent, DocumentMetadata, DocumentRecord, GenericContent, Invoice, MaintenanceReport,
    MaterialLineItem,
};
