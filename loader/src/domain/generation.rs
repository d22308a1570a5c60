//! Document generation and submission orchestration.
//!
//! Each run generates records one at a time, submits each to the backend,
//! stamps the returned identifier (or a deterministic fallback) into the
//! record, and persists a local artifact. A failed submission never aborts the
//! run; a failed artifact write always does.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use document_data::{AssignmentError, DocumentClass, DocumentGenerator, DocumentRecord};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{
    ArtifactStoreError, DocumentArtifactStore, DocumentCreationError, DocumentSubmitter,
};

/// Why a document received a fallback identifier instead of a backend one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// The backend answered but returned no identifier.
    Fallback,
    /// The request failed in transport or with an error status.
    Error,
}

impl FallbackReason {
    /// Return the upper-case tag embedded in fallback identifiers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fallback => "FALLBACK",
            Self::Error => "ERROR",
        }
    }

    /// Classify a submission failure.
    #[must_use]
    pub const fn for_error(error: &DocumentCreationError) -> Self {
        if error.is_missing_identifier() {
            Self::Fallback
        } else {
            Self::Error
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the fallback identifier `{area_code}-{REASON}-{index:05}`.
///
/// # Examples
///
/// ```
/// use content_loader::domain::{FallbackReason, fallback_document_id};
///
/// assert_eq!(
///     fallback_document_id("AP7", FallbackReason::Error, 3),
///     "AP7-ERROR-00003"
/// );
/// ```
#[must_use]
pub fn fallback_document_id(area_code: &str, reason: FallbackReason, index: usize) -> String {
    format!("{area_code}-{reason}-{index:05}")
}

/// How a document obtained its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The backend assigned the identifier.
    Assigned,
    /// Submission failed and a fallback identifier was substituted.
    Fallback {
        /// Fallback category embedded in the identifier.
        reason: FallbackReason,
        /// The submission failure that triggered the fallback.
        error: DocumentCreationError,
    },
}

/// One processed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// One-based position within the run.
    pub index: usize,
    /// Identifier stamped into the record.
    pub document_id: String,
    /// Document class code.
    pub class: DocumentClass,
    /// How the identifier was obtained.
    pub outcome: SubmissionOutcome,
    /// Where the local artifact was written.
    pub artifact_path: PathBuf,
}

impl GeneratedDocument {
    /// Return whether the identifier is a fallback.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.outcome, SubmissionOutcome::Fallback { .. })
    }
}

/// Ordered result of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    documents: Vec<GeneratedDocument>,
}

impl GenerationReport {
    /// Return processed documents in generation order.
    #[must_use]
    pub fn documents(&self) -> &[GeneratedDocument] {
        &self.documents
    }

    /// Return every identifier, real or fallback, in generation order.
    #[must_use]
    pub fn document_ids(&self) -> Vec<&str> {
        self.documents
            .iter()
            .map(|document| document.document_id.as_str())
            .collect()
    }

    /// Consume the report, keeping only the ordered identifiers.
    #[must_use]
    pub fn into_document_ids(self) -> Vec<String> {
        self.documents
            .into_iter()
            .map(|document| document.document_id)
            .collect()
    }

    /// Count documents that received a fallback identifier.
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|document| document.is_fallback())
            .count()
    }
}

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GenerationRunError {
    /// The identifier could not be stamped into the record.
    #[error("document {index}: {source}")]
    Assignment {
        /// One-based document position.
        index: usize,
        /// Underlying assignment failure.
        #[source]
        source: AssignmentError,
    },
    /// The local artifact could not be written.
    #[error("document {index}: {source}")]
    Artifact {
        /// One-based document position.
        index: usize,
        /// Underlying store failure.
        #[source]
        source: ArtifactStoreError,
    },
}

/// Service that generates, submits, and persists documents.
pub struct GenerationOrchestrator<S, A> {
    generator: DocumentGenerator,
    submitter: Arc<S>,
    store: Arc<A>,
}

impl<S, A> GenerationOrchestrator<S, A> {
    /// Create an orchestrator over the given generator and adapters.
    pub const fn new(generator: DocumentGenerator, submitter: Arc<S>, store: Arc<A>) -> Self {
        Self {
            generator,
            submitter,
            store,
        }
    }
}

impl<S, A> GenerationOrchestrator<S, A>
where
    S: DocumentSubmitter,
    A: DocumentArtifactStore,
{
    /// Generate and process `count` documents in sequence.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationRunError`] when an artifact cannot be written.
    /// Submission failures are recorded in the report instead.
    pub async fn run(&mut self, count: usize) -> Result<GenerationReport, GenerationRunError> {
        let mut documents = Vec::with_capacity(count);
        for index in 1..=count {
            documents.push(self.process(index).await?);
        }

        let report = GenerationReport { documents };
        info!(
            documents = count,
            fallbacks = report.fallback_count(),
            "document generation run complete"
        );
        Ok(report)
    }

    async fn process(&mut self, index: usize) -> Result<GeneratedDocument, GenerationRunError> {
        let mut record = self.generator.generate();
        let class = record.class();

        let (document_id, outcome) = match self.submit(&record).await {
            Ok(id) => {
                info!(index, document_id = %id, dcc = %class, "document created");
                (id, SubmissionOutcome::Assigned)
            }
            Err(error) => {
                let reason = FallbackReason::for_error(&error);
                let id = fallback_document_id(&record.metadata.area_code, reason, index);
                warn!(
                    index,
                    fallback_id = %id,
                    reason = %reason,
                    error = %error,
                    "document submission failed; using fallback identifier"
                );
                (id, SubmissionOutcome::Fallback { reason, error })
            }
        };

        record
            .assign_document_id(document_id.as_str())
            .map_err(|source| GenerationRunError::Assignment { index, source })?;
        let artifact_path = self
            .store
            .store(&record)
            .map_err(|source| GenerationRunError::Artifact { index, source })?;

        Ok(GeneratedDocument {
            index,
            document_id,
            class,
            outcome,
            artifact_path,
        })
    }

    async fn submit(&self, record: &DocumentRecord) -> Result<String, DocumentCreationError> {
        let id = self.submitter.create_document(record).await?;
        if id.trim().is_empty() {
            return Err(DocumentCreationError::missing_identifier(
                "backend returned a blank identifier",
            ));
        }
        Ok(id)
    }
}
