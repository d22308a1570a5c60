//! Process entry point wiring settings, adapters, and the orchestrator.

use std::path::Path;
use std::sync::Arc;

use document_data::{CatalogError, DocumentGenerator};
use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::info;

use crate::config::LoaderSettings;
use crate::domain::ports::{ArtifactStoreError, DocumentSubmitter};
use crate::domain::{GenerationOrchestrator, GenerationReport, GenerationRunError};
use crate::outbound::artifacts::CapStdArtifactStore;
use crate::outbound::content_server::{ContentServerClient, ContentServerError};
use crate::outbound::simulated::SimulatedSubmitter;

/// Errors that stop a dataset run before or during generation.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The document catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// Content server settings were invalid.
    #[error("content server configuration error: {0}")]
    Configuration(#[source] ContentServerError),
    /// The content server refused the session.
    #[error("authorization failed: {0}")]
    Authorization(#[source] ContentServerError),
    /// The output directory could not be prepared.
    #[error("output directory error: {0}")]
    OutputDirectory(#[from] ArtifactStoreError),
    /// The run aborted part way through.
    #[error("generation run failed: {0}")]
    Run(#[from] GenerationRunError),
}

/// Generate `num_documents` documents, submit them, and write artifacts to
/// `output_dir`, returning the identifiers in generation order.
///
/// # Errors
///
/// Returns [`DatasetError`] when settings are invalid, authorization fails,
/// or an artifact cannot be written. Individual submission failures are
/// replaced by fallback identifiers instead.
///
/// # Examples
///
/// ```rust,no_run
/// use std::ffi::OsString;
///
/// use content_loader::config::{DEFAULT_OUTPUT_DIR, LoaderSettings};
/// use content_loader::dataset::create_dataset;
/// use ortho_config::OrthoConfig;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = LoaderSettings::load_from_iter([OsString::from("generate-documents")])?;
/// let ids = create_dataset(&settings, 5, DEFAULT_OUTPUT_DIR.as_ref()).await?;
/// assert_eq!(ids.len(), 5);
/// # Ok(())
/// # }
/// ```
pub async fn create_dataset(
    settings: &LoaderSettings,
    num_documents: usize,
    output_dir: &Path,
) -> Result<Vec<String>, DatasetError> {
    let report = generate_dataset(settings, num_documents, output_dir, &DefaultClock).await?;
    Ok(report.into_document_ids())
}

/// Variant of [`create_dataset`] returning the full report and reading
/// "today" from `clock`.
///
/// # Errors
///
/// See [`create_dataset`].
pub async fn generate_dataset(
    settings: &LoaderSettings,
    num_documents: usize,
    output_dir: &Path,
    clock: &dyn Clock,
) -> Result<GenerationReport, DatasetError> {
    let catalog = settings.catalog()?;
    let reference_date = clock.utc().date_naive();
    let generator = DocumentGenerator::new(catalog, settings.seed(), reference_date);
    info!(
        documents = num_documents,
        output_dir = %output_dir.display(),
        offline = settings.offline,
        seed = settings.seed(),
        %reference_date,
        "starting document generation"
    );

    if settings.offline {
        let store = CapStdArtifactStore::open(output_dir)?;
        return run(generator, SimulatedSubmitter::new(), store, num_documents).await;
    }

    let config = settings
        .content_server_config()
        .map_err(DatasetError::Configuration)?;
    let login = settings
        .credentials()
        .map_err(DatasetError::Authorization)?;
    let mut client = ContentServerClient::new(config).map_err(DatasetError::Configuration)?;
    if let Some(credentials) = login {
        client
            .authorize(&credentials)
            .await
            .map_err(DatasetError::Authorization)?;
    } else {
        info!("no credentials configured; submitting without a session ticket");
    }

    let store = CapStdArtifactStore::open(output_dir)?;
    run(generator, client, store, num_documents).await
}

async fn run<S>(
    generator: DocumentGenerator,
    submitter: S,
    store: CapStdArtifactStore,
    num_documents: usize,
) -> Result<GenerationReport, DatasetError>
where
    S: DocumentSubmitter,
{
    let mut orchestrator =
        GenerationOrchestrator::new(generator, Arc::new(submitter), Arc::new(store));
    Ok(orchestrator.run(num_documents).await?)
}
