//! Dependency initialization and wiring for the telemetry loader.

use std::sync::Arc;
use tracing::info;

use crate::LoaderError;
use telemetry_loader_ingest::{ChunkedIngestor, StreamingIngestor};
use telemetry_loader_repository::{
    EngineConfig, IndexManager, OpenSearchProvider, SearchEngineProvider,
};

/// Container for all initialized dependencies.
///
/// Construct once per process: the engine client manages its own
/// connection pool and is shared by every component here.
pub struct Dependencies {
    /// The shared engine provider.
    pub provider: Arc<dyn SearchEngineProvider>,
    /// Keeps bulk-write destinations in existence.
    pub manager: IndexManager,
    /// Ingestor for bounded, in-memory document collections.
    pub chunked: ChunkedIngestor,
    /// Ingestor for unbounded document streams.
    pub streaming: StreamingIngestor,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// Loads a `.env` file when present, resolves the engine endpoint
    /// and credentials (see [`EngineConfig::from_env`]), and verifies
    /// the cluster is healthy before handing anything back.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(LoaderError)` - If configuration is incomplete or the
    ///   engine is unreachable/unhealthy
    pub async fn new() -> Result<Self, LoaderError> {
        dotenv::dotenv().ok();

        let config = EngineConfig::from_env()?;
        Self::with_engine_config(config).await
    }

    /// Initialize all dependencies from an explicit engine config.
    pub async fn with_engine_config(config: EngineConfig) -> Result<Self, LoaderError> {
        info!(url = %config.url, "Initializing dependencies");

        let provider: Arc<dyn SearchEngineProvider> = Arc::new(OpenSearchProvider::new(&config)?);

        let healthy = provider.health_check().await?;
        if !healthy {
            return Err(LoaderError::config("engine cluster is unhealthy"));
        }

        info!("Engine connection verified");

        Ok(Self {
            manager: IndexManager::new(provider.clone()),
            chunked: ChunkedIngestor::new(provider.clone()),
            streaming: StreamingIngestor::new(provider.clone()),
            provider,
        })
    }
}
