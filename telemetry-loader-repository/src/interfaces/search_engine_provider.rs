//! Engine provider trait definition.
//!
//! This module defines the abstract interface for the bulk and
//! index-administration surface of the search engine, allowing for
//! different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::EngineError;
use crate::types::{BulkRequest, BulkResponse};
use telemetry_loader_shared::IndexTarget;

/// Abstracts the engine's bulk and index-administration APIs.
///
/// Implementations are injected into the index manager and the ingestors
/// to enable testing with mock engines. All methods return
/// `Result<T, EngineError>` for consistent error handling.
#[async_trait]
pub trait SearchEngineProvider: Send + Sync {
    /// Check whether the target index or data stream exists.
    ///
    /// Data-stream targets are checked through the data-stream API;
    /// plain indices through the index existence API.
    async fn target_exists(&self, target: &IndexTarget) -> Result<bool, EngineError>;

    /// Create an index with the given settings/mappings body.
    ///
    /// # Errors
    ///
    /// * `EngineError::TargetCreationError` - If the engine rejects the
    ///   creation (mapping conflict, invalid settings).
    async fn create_index(&self, name: &str, body: Value) -> Result<(), EngineError>;

    /// Create a data stream.
    ///
    /// Data streams take a name only; mappings and settings ride on a
    /// separately managed index template.
    async fn create_data_stream(&self, name: &str) -> Result<(), EngineError>;

    /// Delete the target index or data stream.
    ///
    /// A missing target is treated as a successful deletion.
    async fn delete_target(&self, target: &IndexTarget) -> Result<(), EngineError>;

    /// Submit one bulk request and return the parsed per-item outcome.
    ///
    /// Partial per-item failures are reported in the response, not as an
    /// error; only wholesale transport failures error out.
    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, EngineError>;

    /// Check whether the engine cluster is healthy enough to ingest.
    async fn health_check(&self) -> Result<bool, EngineError>;
}
