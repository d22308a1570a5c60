//! Driven port for submitting generated documents to a content backend.
//!
//! The orchestrator only needs the identifier the backend assigns, so the
//! contract is a single call returning that identifier or a typed failure.

use async_trait::async_trait;
use document_data::DocumentRecord;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while creating a document in the backend.
    pub enum DocumentCreationError {
        /// The request never produced a response (connection failure or timeout).
        Unreachable { message: String } =>
            "content server unreachable: {message}",
        /// The backend answered with a non-success status or an unreadable body.
        Rejected { message: String } =>
            "content server rejected document: {message}",
        /// The backend accepted the request but returned no usable identifier.
        MissingIdentifier { message: String } =>
            "content server returned no document identifier: {message}",
    }
}

impl DocumentCreationError {
    /// Return whether the backend answered but withheld an identifier.
    #[must_use]
    pub const fn is_missing_identifier(&self) -> bool {
        matches!(self, Self::MissingIdentifier { .. })
    }
}

/// Port for creating documents in a content backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentSubmitter: Send + Sync {
    /// Create one document and return the identifier the backend assigned.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use content_loader::domain::ports::DocumentSubmitter;
    /// use content_loader::outbound::simulated::SimulatedSubmitter;
    ///
    /// let submitter = SimulatedSubmitter::new();
    /// let id = submitter.create_document(&record).await?;
    /// assert_eq!(id, "SIM-00001");
    /// ```
    async fn create_document(
        &self,
        record: &DocumentRecord,
    ) -> Result<String, DocumentCreationError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::unreachable(DocumentCreationError::unreachable("connection refused"), false)]
    #[case::rejected(DocumentCreationError::rejected("status 500"), false)]
    #[case::missing(DocumentCreationError::missing_identifier("key absent"), true)]
    fn missing_identifier_is_distinguished(
        #[case] error: DocumentCreationError,
        #[case] expected: bool,
    ) {
        assert_eq!(error.is_missing_identifier(), expected);
    }

    #[test]
    fn messages_name_the_failure() {
        let error = DocumentCreationError::rejected("status 503: maintenance");
        assert_eq!(
            error.to_string(),
            "content server rejected document: status 503: maintenance"
        );
    }
}
