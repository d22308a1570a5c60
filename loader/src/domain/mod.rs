//! Domain logic: document generation orchestration and the ports it drives.

pub mod ports;

mod generation;

pub use generation::{
    FallbackReason, GeneratedDocument, GenerationOrchestrator, GenerationReport,
    GenerationRunError, SubmissionOutcome, fallback_document_id,
};
