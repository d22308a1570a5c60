//! Error types for the document-data crate.
//!
//! Generation itself is infallible once a catalog has been validated, so the
//! errors here cover catalog loading and identifier assignment only.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or validating a document catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file at '{path}': {message}")]
    IoError {
        /// Path to the catalog file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The catalog JSON is malformed or missing required fields.
    #[error("invalid catalog JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The area code is blank.
    #[error("catalog area code must not be blank")]
    BlankAreaCode,

    /// A list the generator draws from is empty.
    #[error("catalog field '{field}' must contain at least one entry")]
    EmptyField {
        /// Name of the empty catalog field.
        field: &'static str,
    },

    /// A list entry is blank.
    #[error("catalog field '{field}' has a blank entry at index {index}")]
    BlankEntry {
        /// Name of the catalog field.
        field: &'static str,
        /// Index of the blank entry.
        index: usize,
    },

    /// The tag vocabulary is too small to sample from without replacement.
    #[error("catalog needs at least {required} tags, found {actual}")]
    TooFewTags {
        /// Number of tags sampled per document.
        required: usize,
        /// Number of tags supplied.
        actual: usize,
    },

    /// The tag vocabulary contains the same tag twice.
    #[error("catalog tag '{tag}' appears more than once")]
    DuplicateTag {
        /// The repeated tag.
        tag: String,
    },
}

/// Errors raised when assigning a document identifier to a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// The record already carries an identifier.
    #[error("document already has identifier '{existing}'")]
    AlreadyAssigned {
        /// Identifier assigned earlier.
        existing: String,
    },

    /// The supplied identifier is blank.
    #[error("document identifier must not be blank")]
    BlankIdentifier,
}
