//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of
//! `SearchEngineProvider` using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{
        IndicesCreateDataStreamParts, IndicesCreateParts, IndicesDeleteDataStreamParts,
        IndicesDeleteParts, IndicesExistsParts, IndicesGetDataStreamParts,
    },
    params::Refresh,
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::config::{EngineConfig, EngineCredentials};
use crate::errors::EngineError;
use crate::interfaces::SearchEngineProvider;
use crate::types::{BulkRequest, BulkResponse};
use telemetry_loader_shared::{IndexTarget, TargetKind};

/// OpenSearch-backed engine provider.
///
/// Construct once per process and share via `Arc`; the client manages its
/// own connection pool.
///
/// # Example
///
/// ```ignore
/// use telemetry_loader_repository::{EngineConfig, EngineCredentials, OpenSearchProvider};
///
/// let config = EngineConfig::new(
///     "http://localhost:9200",
///     EngineCredentials::Basic {
///         username: "admin".to_string(),
///         password: "admin".to_string(),
///     },
/// );
/// let provider = OpenSearchProvider::new(&config)?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new provider connected to the configured endpoint.
    ///
    /// # Errors
    ///
    /// * `EngineError::ConnectionError` - If the URL is invalid or the
    ///   transport cannot be built.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| EngineError::connection(e.to_string()))?;

        let credentials = match &config.credentials {
            EngineCredentials::ApiKey { id, key } => {
                Credentials::ApiKey(id.clone(), key.clone())
            }
            EngineCredentials::Basic { username, password } => {
                Credentials::Basic(username.clone(), password.clone())
            }
        };

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .auth(credentials)
            .disable_proxy()
            .build()
            .map_err(|e| EngineError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %config.url, "Created OpenSearch provider");

        Ok(Self { client })
    }
}

#[async_trait]
impl SearchEngineProvider for OpenSearchProvider {
    /// Check whether the target exists.
    ///
    /// Plain indices use the index existence call (404 means absent);
    /// data streams are looked up through the data-stream API, which has
    /// no dedicated existence endpoint.
    async fn target_exists(&self, target: &IndexTarget) -> Result<bool, EngineError> {
        let status = match target.kind {
            TargetKind::Index => {
                let response = self
                    .client
                    .indices()
                    .exists(IndicesExistsParts::Index(&[&target.name]))
                    .send()
                    .await
                    .map_err(|e| EngineError::connection(e.to_string()))?;
                response.status_code()
            }
            TargetKind::DataStream => {
                let response = self
                    .client
                    .indices()
                    .get_data_stream(IndicesGetDataStreamParts::Name(&[&target.name]))
                    .send()
                    .await
                    .map_err(|e| EngineError::connection(e.to_string()))?;
                response.status_code()
            }
        };

        debug!(target = %target.name, status = %status, "Existence check");
        Ok(status.is_success())
    }

    async fn create_index(&self, name: &str, body: Value) -> Result<(), EngineError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(name))
            .body(body)
            .send()
            .await
            .map_err(|e| EngineError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %name, status = %status, body = %error_body, "Index creation failed");
            return Err(EngineError::target_creation(format!(
                "create index '{}' failed with status {}: {}",
                name, status, error_body
            )));
        }

        info!(index = %name, "Created index");
        Ok(())
    }

    async fn create_data_stream(&self, name: &str) -> Result<(), EngineError> {
        let response = self
            .client
            .indices()
            .create_data_stream(IndicesCreateDataStreamParts::Name(name))
            .send()
            .await
            .map_err(|e| EngineError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(data_stream = %name, status = %status, body = %error_body, "Data stream creation failed");
            return Err(EngineError::target_creation(format!(
                "create data stream '{}' failed with status {}: {}",
                name, status, error_body
            )));
        }

        info!(data_stream = %name, "Created data stream");
        Ok(())
    }

    /// Delete the target; a 404 is treated as success.
    async fn delete_target(&self, target: &IndexTarget) -> Result<(), EngineError> {
        let response = match target.kind {
            TargetKind::Index => self
                .client
                .indices()
                .delete(IndicesDeleteParts::Index(&[&target.name]))
                .send()
                .await
                .map_err(|e| EngineError::connection(e.to_string()))?,
            TargetKind::DataStream => self
                .client
                .indices()
                .delete_data_stream(IndicesDeleteDataStreamParts::Name(&[&target.name]))
                .send()
                .await
                .map_err(|e| EngineError::connection(e.to_string()))?,
        };

        let status = response.status_code();
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(target = %target.name, status = %status, body = %error_body, "Delete request failed");
            return Err(EngineError::connection(format!(
                "delete '{}' failed with status {}: {}",
                target.name, status, error_body
            )));
        }

        debug!(target = %target.name, "Target deleted");
        Ok(())
    }

    /// Submit one bulk request.
    ///
    /// The body is the flat alternating header/document sequence. A
    /// non-2xx response or a transport failure errors out; per-item
    /// failures come back in the parsed response for the caller to
    /// audit.
    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, EngineError> {
        let body: Vec<JsonBody<Value>> = request
            .body_lines()
            .into_iter()
            .map(JsonBody::from)
            .collect();

        let refresh = if request.refresh {
            Refresh::True
        } else {
            Refresh::False
        };

        let mut bulk = self
            .client
            .bulk(BulkParts::Index(&request.target.name))
            .body(body)
            .refresh(refresh);
        if let Some(ref pipeline) = request.pipeline {
            bulk = bulk.pipeline(pipeline);
        }

        let response = bulk
            .send()
            .await
            .map_err(|e| EngineError::bulk_transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(target = %request.target.name, status = %status, body = %error_body, "Bulk request failed");
            return Err(EngineError::bulk_transport(format!(
                "bulk to '{}' failed with status {}: {}",
                request.target.name, status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| EngineError::response_parse(e.to_string()))?;

        Ok(BulkResponse::from_value(&response_body))
    }

    /// Cluster health; green or yellow counts as healthy.
    async fn health_check(&self) -> Result<bool, EngineError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| EngineError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| EngineError::response_parse(e.to_string()))?;

        let status = health
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        debug!(status = %status, "Cluster health");
        Ok(status == "green" || status == "yellow")
    }
}
