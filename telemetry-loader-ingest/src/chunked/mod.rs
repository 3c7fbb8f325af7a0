//! Chunked bulk ingestor.
//!
//! Takes a bounded, fully materialized document array, splits it into
//! fixed-size chunks, and submits one bulk call per chunk. A single
//! malformed document must not abort ingestion of millions of siblings,
//! so per-item failures are logged and tallied while the run continues;
//! only wholesale transport failures propagate.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::audit::audit_bulk_response;
use crate::errors::IngestError;
use crate::progress::IngestProgress;
use telemetry_loader_repository::{
    BulkAction, BulkActionKind, BulkRequest, SearchEngineProvider,
};
use telemetry_loader_shared::{IndexTarget, IngestionReport};

/// Metadata stamped onto documents before transmission.
///
/// The core never interprets document content; these are the only
/// mutations it performs.
#[derive(Debug, Clone, Default)]
pub struct MetadataOptions {
    /// Assign a generated UUID as the explicit document id.
    pub generate_ids: bool,
    /// Stamp the current time (RFC 3339) into this top-level field.
    pub timestamp_field: Option<String>,
}

/// Options for one chunked ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Maximum documents per bulk request.
    pub chunk_size: usize,
    /// Write semantics; forced to `create` for data-stream targets.
    pub action: BulkActionKind,
    /// Force near-real-time visibility after each bulk call.
    pub refresh: bool,
    /// Optional ingest pipeline name.
    pub pipeline: Option<String>,
    /// Metadata stamping configuration.
    pub metadata: MetadataOptions,
    /// Drive a textual progress indicator.
    pub show_progress: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            // Large enough to amortize per-request overhead, small enough
            // to stay under typical payload ceilings.
            chunk_size: 10_000,
            action: BulkActionKind::Index,
            refresh: false,
            pipeline: None,
            metadata: MetadataOptions::default(),
            show_progress: false,
        }
    }
}

/// Ingestor for bounded, in-memory document collections.
pub struct ChunkedIngestor {
    provider: Arc<dyn SearchEngineProvider>,
}

impl ChunkedIngestor {
    /// Create a new ingestor over the given provider.
    pub fn new(provider: Arc<dyn SearchEngineProvider>) -> Self {
        Self { provider }
    }

    /// Ingest the documents into the target, one chunk at a time.
    ///
    /// Chunks are submitted sequentially: chunk N+1 goes out only after
    /// chunk N has settled, bounding the engine to one outstanding bulk
    /// request per run. Partial per-item failures are audited and
    /// tallied into the report; the run then continues with the next
    /// chunk. Transport failures propagate and abort the run.
    #[instrument(skip(self, documents, options), fields(target = %target.name, count = documents.len()))]
    pub async fn ingest(
        &self,
        target: &IndexTarget,
        documents: Vec<Value>,
        options: &IngestOptions,
    ) -> Result<IngestionReport, IngestError> {
        let total = documents.len();
        let mut report = IngestionReport::new();

        if total == 0 {
            debug!("Nothing to ingest");
            return Ok(report);
        }

        let progress = options
            .show_progress
            .then(|| IngestProgress::start(total as u64));

        let chunk_size = options.chunk_size.max(1);
        let mut docs = documents.into_iter().peekable();
        let mut chunk_index = 0usize;

        while docs.peek().is_some() {
            let operations: Vec<(BulkAction, Value)> = docs
                .by_ref()
                .take(chunk_size)
                .map(|doc| self.prepare(target, doc, options))
                .collect();
            let chunk_len = operations.len();

            let request = BulkRequest {
                target: target.clone(),
                operations,
                refresh: options.refresh,
                pipeline: options.pipeline.clone(),
            };

            let response = self.provider.bulk(&request).await?;

            report.attempted += chunk_len;
            audit_bulk_response(
                &response,
                &format!("bulk chunk {} into {}", chunk_index, target.name),
            );

            let failed = response.failures().len();
            report.failed += failed;
            report.failures.extend(response.failed_items());

            if let Some(ref progress) = progress {
                progress.advance(chunk_len as u64);
            }

            debug!(chunk = chunk_index, size = chunk_len, failed, "Chunk submitted");
            chunk_index += 1;
        }

        if let Some(ref progress) = progress {
            progress.finish();
        }

        info!(
            attempted = report.attempted,
            failed = report.failed,
            "Ingestion run complete"
        );

        Ok(report)
    }

    /// Turn one raw document into its (operation, document) pair,
    /// stamping metadata when configured.
    fn prepare(
        &self,
        target: &IndexTarget,
        mut doc: Value,
        options: &IngestOptions,
    ) -> (BulkAction, Value) {
        let mut action = BulkAction {
            kind: options.action,
            id: None,
        }
        .resolve_for(target);

        if options.metadata.generate_ids {
            action.id = Some(Uuid::new_v4().to_string());
        }

        if let Some(ref field) = options.metadata.timestamp_field {
            if let Some(obj) = doc.as_object_mut() {
                obj.insert(field.clone(), json!(Utc::now().to_rfc3339()));
            }
        }

        (action, doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use telemetry_loader_repository::{BulkResponse, EngineError};
    use tokio::sync::Mutex;

    /// Mock provider that records requests and replays scripted
    /// responses.
    struct MockProvider {
        requests: Mutex<Vec<BulkRequest>>,
        responses: Mutex<VecDeque<BulkResponse>>,
        fail_transport: bool,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(VecDeque::new()),
                fail_transport: false,
            }
        }

        fn with_responses(responses: Vec<BulkResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                ..Self::new()
            }
        }

        fn failing_transport() -> Self {
            Self {
                fail_transport: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SearchEngineProvider for MockProvider {
        async fn target_exists(&self, _target: &IndexTarget) -> Result<bool, EngineError> {
            Ok(true)
        }

        async fn create_index(&self, _name: &str, _body: Value) -> Result<(), EngineError> {
            Ok(())
        }

        async fn create_data_stream(&self, _name: &str) -> Result<(), EngineError> {
            Ok(())
        }

        async fn delete_target(&self, _target: &IndexTarget) -> Result<(), EngineError> {
            Ok(())
        }

        async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, EngineError> {
            if self.fail_transport {
                return Err(EngineError::bulk_transport("connection refused"));
            }
            self.requests.lock().await.push(request.clone());
            let scripted = self.responses.lock().await.pop_front();
            Ok(scripted.unwrap_or_default())
        }

        async fn health_check(&self) -> Result<bool, EngineError> {
            Ok(true)
        }
    }

    fn docs(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({"event": {"sequence": i}})).collect()
    }

    fn failure_response(position_id: &str) -> BulkResponse {
        BulkResponse::from_value(&json!({
            "errors": true,
            "items": [
                {"index": {"_id": position_id, "status": 400,
                           "error": {"type": "mapper_parsing_exception", "reason": "bad field"}}}
            ]
        }))
    }

    #[tokio::test]
    async fn test_chunking_completeness() {
        let provider = Arc::new(MockProvider::new());
        let ingestor = ChunkedIngestor::new(provider.clone());
        let target = IndexTarget::from_name("security-alerts");

        let options = IngestOptions {
            chunk_size: 10,
            ..IngestOptions::default()
        };
        let report = ingestor.ingest(&target, docs(25), &options).await.unwrap();

        // ceil(25 / 10) submissions, sized 10, 10, 5.
        let requests = provider.requests.lock().await;
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].len(), 10);
        assert_eq!(requests[1].len(), 10);
        assert_eq!(requests[2].len(), 5);

        // Concatenation of all chunks equals the input, in order.
        let sequence: Vec<u64> = requests
            .iter()
            .flat_map(|r| r.operations.iter())
            .map(|(_, doc)| doc["event"]["sequence"].as_u64().unwrap())
            .collect();
        assert_eq!(sequence, (0..25).collect::<Vec<u64>>());

        assert_eq!(report.attempted, 25);
        assert_eq!(report.failed, 0);
    }

    #[tokio::test]
    async fn test_empty_input_issues_no_calls() {
        let provider = Arc::new(MockProvider::new());
        let ingestor = ChunkedIngestor::new(provider.clone());
        let target = IndexTarget::from_name("security-alerts");

        let report = ingestor
            .ingest(&target, vec![], &IngestOptions::default())
            .await
            .unwrap();

        assert!(provider.requests.lock().await.is_empty());
        assert_eq!(report.attempted, 0);
    }

    #[tokio::test]
    async fn test_partial_failure_does_not_abort() {
        // Chunk 2 of 3 reports one failed item.
        let provider = Arc::new(MockProvider::with_responses(vec![
            BulkResponse::default(),
            failure_response("doc-13"),
            BulkResponse::default(),
        ]));
        let ingestor = ChunkedIngestor::new(provider.clone());
        let target = IndexTarget::from_name("security-alerts");

        let options = IngestOptions {
            chunk_size: 10,
            ..IngestOptions::default()
        };
        let report = ingestor.ingest(&target, docs(25), &options).await.unwrap();

        // All three chunks were still submitted.
        assert_eq!(provider.requests.lock().await.len(), 3);
        assert_eq!(report.attempted, 25);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0]["index"]["_id"], "doc-13");
    }

    #[tokio::test]
    async fn test_transport_failure_aborts() {
        let provider = Arc::new(MockProvider::failing_transport());
        let ingestor = ChunkedIngestor::new(provider);
        let target = IndexTarget::from_name("security-alerts");

        let result = ingestor
            .ingest(&target, docs(5), &IngestOptions::default())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            IngestError::EngineError(EngineError::BulkTransportError(_))
        ));
    }

    #[tokio::test]
    async fn test_metadata_stamping() {
        let provider = Arc::new(MockProvider::new());
        let ingestor = ChunkedIngestor::new(provider.clone());
        let target = IndexTarget::from_name("security-alerts");

        let options = IngestOptions {
            metadata: MetadataOptions {
                generate_ids: true,
                timestamp_field: Some("event.ingested".to_string()),
            },
            ..IngestOptions::default()
        };
        ingestor.ingest(&target, docs(2), &options).await.unwrap();

        let requests = provider.requests.lock().await;
        let (action, doc) = &requests[0].operations[0];
        assert!(action.id.is_some());
        assert!(doc["event.ingested"].is_string());
    }

    #[tokio::test]
    async fn test_data_stream_target_forces_create() {
        let provider = Arc::new(MockProvider::new());
        let ingestor = ChunkedIngestor::new(provider.clone());
        let target = IndexTarget::from_name("logs-endpoint.events-default");

        // Caller asked for index semantics; data streams only take create.
        let options = IngestOptions {
            action: BulkActionKind::Index,
            ..IngestOptions::default()
        };
        ingestor.ingest(&target, docs(1), &options).await.unwrap();

        let requests = provider.requests.lock().await;
        let (action, _) = &requests[0].operations[0];
        assert_eq!(action.kind, BulkActionKind::Create);
    }

    #[tokio::test]
    async fn test_refresh_and_pipeline_forwarded() {
        let provider = Arc::new(MockProvider::new());
        let ingestor = ChunkedIngestor::new(provider.clone());
        let target = IndexTarget::from_name("security-alerts");

        let options = IngestOptions {
            refresh: true,
            pipeline: Some("telemetry-enrich".to_string()),
            ..IngestOptions::default()
        };
        ingestor.ingest(&target, docs(1), &options).await.unwrap();

        let requests = provider.requests.lock().await;
        assert!(requests[0].refresh);
        assert_eq!(requests[0].pipeline.as_deref(), Some("telemetry-enrich"));
    }
}
