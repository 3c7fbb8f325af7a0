//! # Telemetry Loader Repository
//!
//! This crate provides the engine boundary for the telemetry loader: the
//! abstract provider trait, a concrete OpenSearch implementation, engine
//! configuration, and the index manager that keeps bulk-write destinations
//! in existence.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod manager;
pub mod opensearch;
pub mod types;

pub use config::{EngineConfig, EngineCredentials};
pub use errors::EngineError;
pub use interfaces::SearchEngineProvider;
pub use manager::IndexManager;
pub use opensearch::OpenSearchProvider;
pub use types::{BulkAction, BulkActionKind, BulkItemFailure, BulkRequest, BulkResponse};
