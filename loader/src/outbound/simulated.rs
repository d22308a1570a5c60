//! Offline document submitter.
//!
//! Issues `SIM-{n:05}` identifiers in call order without touching the
//! network, so the full generate-and-persist pipeline can run without a
//! content server.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use document_data::DocumentRecord;
use tracing::debug;

use crate::domain::ports::{DocumentCreationError, DocumentSubmitter};

/// Prefix of simulated identifiers.
pub const SIMULATED_ID_PREFIX: &str = "SIM";

/// Submitter that fabricates sequential identifiers.
///
/// # Examples
///
/// ```
/// use content_loader::outbound::simulated::SimulatedSubmitter;
///
/// let submitter = SimulatedSubmitter::new();
/// assert_eq!(submitter.issued(), 0);
/// ```
#[derive(Debug, Default)]
pub struct SimulatedSubmitter {
    issued: AtomicUsize,
}

impl SimulatedSubmitter {
    /// Create a submitter whose first identifier is `SIM-00001`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: AtomicUsize::new(0),
        }
    }

    /// Return how many identifiers have been issued.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DocumentSubmitter for SimulatedSubmitter {
    async fn create_document(
        &self,
        record: &DocumentRecord,
    ) -> Result<String, DocumentCreationError> {
        let sequence = self.issued.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        let id = format!("{SIMULATED_ID_PREFIX}-{sequence:05}");
        debug!(document_id = %id, dcc = %record.class(), "simulated document creation");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use document_data::{DocumentCatalog, DocumentGenerator};

    use super::*;

    #[tokio::test]
    async fn identifiers_are_sequential() {
        let reference = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
        let mut generator = DocumentGenerator::new(DocumentCatalog::pump_house(), 42, reference);
        let submitter = SimulatedSubmitter::new();

        let mut ids = Vec::new();
        for record in generator.generate_batch(3) {
            ids.push(submitter.create_document(&record).await.expect("simulated id"));
        }

        assert_eq!(ids, ["SIM-00001", "SIM-00002", "SIM-00003"]);
        assert_eq!(submitter.issued(), 3);
    }
}
