//! # Telemetry Loader Ingest
//!
//! This crate provides the bulk-ingestion helpers for loading synthetic
//! security telemetry into the search engine.
//!
//! ## Architecture
//!
//! Two ingestors share one partial-failure policy:
//!
//! 1. **Chunked**: a bounded, in-memory document array, split into
//!    fixed-size chunks and submitted one bulk call at a time
//! 2. **Streaming**: an unbounded asynchronous document sequence,
//!    buffered and auto-flushed on a byte threshold or a flush interval
//! 3. **Auditor**: logs the individually failed items of a bulk response
//!    without ever aborting the run on behalf of the caller

pub mod audit;
pub mod chunked;
pub mod errors;
pub mod progress;
pub mod streaming;

pub use audit::audit_bulk_response;
pub use chunked::{ChunkedIngestor, IngestOptions, MetadataOptions};
pub use errors::IngestError;
pub use streaming::{
    DroppedDocument, StreamingCallbacks, StreamingConfig, StreamingIngestor, StreamingSummary,
};
