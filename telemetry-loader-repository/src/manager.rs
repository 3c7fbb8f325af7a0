//! Index manager.
//!
//! Ensures bulk-write destinations exist before ingestion starts.
//! Creation is idempotent: an existing target short-circuits on the
//! existence check, so at most one create call is issued per distinct
//! target.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::errors::EngineError;
use crate::interfaces::SearchEngineProvider;
use crate::opensearch::merge_index_body;
use telemetry_loader_shared::{IndexTarget, TargetKind};

/// Keeps bulk-write destinations in existence.
pub struct IndexManager {
    provider: Arc<dyn SearchEngineProvider>,
}

impl IndexManager {
    /// Create a new manager over the given provider.
    pub fn new(provider: Arc<dyn SearchEngineProvider>) -> Self {
        Self { provider }
    }

    /// Ensure the target exists, creating it if absent.
    ///
    /// Plain indices are created with the caller's mappings/settings
    /// merged over the wide-document defaults. Data streams are created
    /// by name only; their mappings ride on an index template managed
    /// elsewhere.
    ///
    /// # Errors
    ///
    /// * `EngineError::TargetCreationError` - If the engine rejects the
    ///   creation. This is fatal for the calling ingestion flow: writing
    ///   into a missing, non-auto-created target would silently drop
    ///   data.
    #[instrument(skip(self, mappings, settings), fields(target = %target.name))]
    pub async fn ensure_target(
        &self,
        target: &IndexTarget,
        mappings: Option<Value>,
        settings: Option<Value>,
    ) -> Result<(), EngineError> {
        if self.provider.target_exists(target).await? {
            debug!("Target already exists");
            return Ok(());
        }

        let result = match target.kind {
            TargetKind::Index => {
                let body = merge_index_body(mappings, settings);
                self.provider.create_index(&target.name, body).await
            }
            TargetKind::DataStream => self.provider.create_data_stream(&target.name).await,
        };

        if let Err(ref e) = result {
            error!(error = %e, "Failed to create target");
        } else {
            info!("Target created");
        }

        result
    }

    /// Delete the target; missing targets are treated as success.
    #[instrument(skip(self), fields(target = %target.name))]
    pub async fn delete_target(&self, target: &IndexTarget) -> Result<(), EngineError> {
        self.provider.delete_target(target).await
    }
}
