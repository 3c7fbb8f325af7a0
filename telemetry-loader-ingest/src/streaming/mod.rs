//! Streaming bulk ingestor.
//!
//! Takes an unbounded asynchronous document sequence and bulk-loads it
//! without ever holding the whole set in memory. The internal buffer is
//! flushed when its serialized byte size reaches the configured
//! threshold OR when the flush interval elapses, whichever happens
//! first: the byte threshold bounds memory, the interval bounds
//! staleness, independently of throughput.
//!
//! Unlike the chunked ingestor, a streaming run has no natural
//! report-at-the-end checkpoint, so permanently failed documents are
//! surfaced immediately through the drop callback and the caller
//! decides whether the run survives them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::{Stream, StreamExt};
use serde_json::Value;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

use crate::audit::audit_bulk_response;
use crate::errors::IngestError;
use telemetry_loader_repository::{BulkAction, BulkItemFailure, BulkRequest, SearchEngineProvider};
use telemetry_loader_shared::IndexTarget;

/// Maps a raw input document to its (operation, document) pair.
pub type DocumentTransform = Box<dyn FnMut(Value) -> (BulkAction, Value) + Send>;

/// Invoked once per individually acknowledged document.
pub type SuccessCallback = Box<dyn FnMut(&Value) + Send>;

/// Invoked once per permanently dropped document; returning an error
/// aborts the run.
pub type DropCallback = Box<dyn FnMut(DroppedDocument) -> Result<(), IngestError> + Send>;

/// A document the engine reported as permanently failed.
#[derive(Debug)]
pub struct DroppedDocument {
    /// The document as it was submitted.
    pub document: Value,
    /// The engine's per-item failure entry.
    pub failure: BulkItemFailure,
}

/// Caller hooks for one streaming run.
///
/// All hooks are optional. The default transform writes `create`
/// operations with no explicit id (the engine assigns one); the default
/// drop handler logs the failure and aborts the run, since continuing
/// after drops would silently leave holes in the loaded data.
#[derive(Default)]
pub struct StreamingCallbacks {
    /// Per-document transform; defaults to a `create` with no id.
    pub transform: Option<DocumentTransform>,
    /// Success hook, commonly used for progress increments.
    pub on_success: Option<SuccessCallback>,
    /// Drop hook; decides whether the run survives a dropped document.
    pub on_drop: Option<DropCallback>,
}

impl StreamingCallbacks {
    /// Create an empty callback set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-document transform.
    pub fn with_transform(
        mut self,
        f: impl FnMut(Value) -> (BulkAction, Value) + Send + 'static,
    ) -> Self {
        self.transform = Some(Box::new(f));
        self
    }

    /// Set the success hook.
    pub fn with_on_success(mut self, f: impl FnMut(&Value) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    /// Set the drop hook.
    pub fn with_on_drop(
        mut self,
        f: impl FnMut(DroppedDocument) -> Result<(), IngestError> + Send + 'static,
    ) -> Self {
        self.on_drop = Some(Box::new(f));
        self
    }
}

/// Configuration for the streaming ingestor.
#[derive(Debug, Clone)]
pub struct StreamingConfig {
    /// Flush when the buffered serialized size reaches this many bytes.
    pub flush_bytes: usize,
    /// Flush when this much time has passed since the last flush.
    pub flush_interval: Duration,
    /// Force near-real-time visibility after each flush.
    pub refresh: bool,
    /// Optional ingest pipeline name.
    pub pipeline: Option<String>,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            flush_bytes: 1024 * 1024,
            flush_interval: Duration::from_secs(5),
            refresh: false,
            pipeline: None,
        }
    }
}

/// Counts accumulated over one streaming run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamingSummary {
    /// Documents submitted to the engine.
    pub attempted: usize,
    /// Documents the engine reported as permanently failed.
    pub dropped: usize,
    /// Number of bulk flushes issued.
    pub flushes: usize,
}

impl StreamingSummary {
    /// Documents the engine acknowledged.
    pub fn succeeded(&self) -> usize {
        self.attempted.saturating_sub(self.dropped)
    }
}

/// Ingestor for unbounded asynchronous document sequences.
pub struct StreamingIngestor {
    provider: Arc<dyn SearchEngineProvider>,
    config: StreamingConfig,
}

impl StreamingIngestor {
    /// Create a new ingestor with default configuration.
    pub fn new(provider: Arc<dyn SearchEngineProvider>) -> Self {
        Self {
            provider,
            config: StreamingConfig::default(),
        }
    }

    /// Create a new ingestor with custom configuration.
    pub fn with_config(provider: Arc<dyn SearchEngineProvider>, config: StreamingConfig) -> Self {
        Self { provider, config }
    }

    /// Pull documents from the source until it is exhausted, flushing on
    /// the byte threshold or the flush interval, whichever comes first.
    ///
    /// Completes only after the source ends and every buffered document
    /// has been flushed and settled. Pulling, buffering, and flushing
    /// are sequenced, so document order is preserved end to end.
    #[instrument(skip(self, source, callbacks), fields(target = %target.name))]
    pub async fn run<S>(
        &self,
        target: &IndexTarget,
        mut source: S,
        callbacks: StreamingCallbacks,
    ) -> Result<StreamingSummary, IngestError>
    where
        S: Stream<Item = Value> + Unpin + Send,
    {
        let mut transform = callbacks
            .transform
            .unwrap_or_else(|| Box::new(|doc: Value| (BulkAction::create(), doc)));
        let mut on_success = callbacks
            .on_success
            .unwrap_or_else(|| Box::new(|_doc: &Value| {}));
        let mut on_drop = callbacks.on_drop.unwrap_or_else(|| {
            Box::new(|dropped: DroppedDocument| {
                warn!(
                    position = dropped.failure.position,
                    error = %dropped.failure.error,
                    "Document permanently dropped, aborting run"
                );
                Err(IngestError::dropped(dropped.failure.error.to_string()))
            })
        });

        let mut summary = StreamingSummary::default();
        let mut buffer: Vec<(BulkAction, Value)> = Vec::new();
        let mut buffered_bytes = 0usize;

        let deadline = sleep(self.config.flush_interval);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                maybe_doc = source.next() => {
                    match maybe_doc {
                        Some(doc) => {
                            let (action, doc) = transform(doc);
                            let action = action.resolve_for(target);
                            buffered_bytes += doc.to_string().len();
                            buffer.push((action, doc));

                            if buffered_bytes >= self.config.flush_bytes {
                                self.flush(
                                    target,
                                    &mut buffer,
                                    &mut buffered_bytes,
                                    &mut on_success,
                                    &mut on_drop,
                                    &mut summary,
                                )
                                .await?;
                                deadline.as_mut().reset(Instant::now() + self.config.flush_interval);
                            }
                        }
                        None => break,
                    }
                }
                _ = &mut deadline => {
                    self.flush(
                        target,
                        &mut buffer,
                        &mut buffered_bytes,
                        &mut on_success,
                        &mut on_drop,
                        &mut summary,
                    )
                    .await?;
                    deadline.as_mut().reset(Instant::now() + self.config.flush_interval);
                }
            }
        }

        // Drain whatever the last interval left behind.
        self.flush(
            target,
            &mut buffer,
            &mut buffered_bytes,
            &mut on_success,
            &mut on_drop,
            &mut summary,
        )
        .await?;

        info!(
            attempted = summary.attempted,
            dropped = summary.dropped,
            flushes = summary.flushes,
            "Streaming ingestion complete"
        );

        Ok(summary)
    }

    /// Submit the buffered operations as one bulk call and dispatch the
    /// per-item outcomes to the callbacks.
    async fn flush(
        &self,
        target: &IndexTarget,
        buffer: &mut Vec<(BulkAction, Value)>,
        buffered_bytes: &mut usize,
        on_success: &mut SuccessCallback,
        on_drop: &mut DropCallback,
        summary: &mut StreamingSummary,
    ) -> Result<(), IngestError> {
        if buffer.is_empty() {
            return Ok(());
        }

        let operations = std::mem::take(buffer);
        *buffered_bytes = 0;
        let count = operations.len();

        let request = BulkRequest {
            target: target.clone(),
            operations,
            refresh: self.config.refresh,
            pipeline: self.config.pipeline.clone(),
        };

        let response = self.provider.bulk(&request).await?;

        summary.flushes += 1;
        summary.attempted += count;
        audit_bulk_response(&response, &format!("streaming flush into {}", target.name));

        let mut failed: HashMap<usize, BulkItemFailure> = response
            .failures()
            .into_iter()
            .map(|f| (f.position, f))
            .collect();

        for (position, (_action, doc)) in request.operations.into_iter().enumerate() {
            if let Some(failure) = failed.remove(&position) {
                summary.dropped += 1;
                on_drop(DroppedDocument {
                    document: doc,
                    failure,
                })?;
            } else {
                on_success(&doc);
            }
        }

        debug!(count, "Flushed buffer");
        Ok(())
    }
}
