//! # Telemetry Loader
//!
//! Top-level wiring for the synthetic security telemetry bulk loader.
//!
//! This crate provides the entry point and configuration for running
//! ingestion flows: the engine client is constructed once from the
//! environment and shared across the index manager and both ingestors.

pub mod config;
pub mod telemetry;

pub use config::Dependencies;

use thiserror::Error;

use telemetry_loader_ingest::IngestError;
use telemetry_loader_repository::EngineError;

/// Errors that can occur during loader initialization or execution.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Engine error.
    #[error("Engine error: {0}")]
    EngineError(#[from] EngineError),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),
}

impl LoaderError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
