//! Error types for the telemetry loader ingest.

use telemetry_loader_repository::EngineError;
use thiserror::Error;

/// Errors that can occur during ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Error from the engine boundary (transport, target creation).
    #[error("Engine error: {0}")]
    EngineError(#[from] EngineError),

    /// A document was permanently dropped and the drop handler chose to
    /// abort the run.
    #[error("Document dropped: {0}")]
    DocumentDropped(String),
}

impl IngestError {
    /// Create a dropped-document error.
    pub fn dropped(msg: impl Into<String>) -> Self {
        Self::DocumentDropped(msg.into())
    }
}
