//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod artifact_store;
mod document_submitter;

#[cfg(test)]
pub use artifact_store::MockDocumentArtifactStore;
pub use artifact_store::{ArtifactStoreError, DocumentArtifactStore};
#[cfg(test)]
pub use document_submitter::MockDocumentSubmitter;
pub use document_submitter::{DocumentCreationError, DocumentSubmitter};
