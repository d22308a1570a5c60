//! Driven port for persisting local copies of submitted documents.

use std::path::PathBuf;

use document_data::DocumentRecord;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while persisting a document artifact.
    pub enum ArtifactStoreError {
        /// The record has no document identifier to name the artifact after.
        Unidentified => "document has no identifier to name its artifact",
        /// The document identifier cannot name a file, e.g. it is blank.
        InvalidFileName { name: String } =>
            "document identifier {name:?} cannot name an artifact file",
        /// The record could not be serialised.
        Serialize { message: String } =>
            "failed to serialise document: {message}",
        /// The output directory could not be prepared.
        Directory { path: String, message: String } =>
            "failed to prepare output directory {path}: {message}",
        /// The artifact file could not be written.
        Write { path: String, message: String } =>
            "failed to write artifact {path}: {message}",
    }
}

/// Port for writing one artifact per identified document.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentArtifactStore: Send + Sync {
    /// Persist `record` under its document identifier and return the
    /// artifact's path.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactStoreError`] when the record is unidentified, its
    /// identifier cannot name a file, or the write fails.
    fn store(&self, record: &DocumentRecord) -> Result<PathBuf, ArtifactStoreError>;
}
