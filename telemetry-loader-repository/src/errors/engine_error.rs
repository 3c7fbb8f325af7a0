//! Engine error types.
//!
//! This module defines the error types that can occur at the engine
//! boundary.

use thiserror::Error;

/// Errors that can occur while talking to the search engine.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Invalid or missing configuration (endpoint, credentials).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failed to reach the engine or build the transport.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The engine rejected an index or data-stream creation.
    #[error("Target creation error: {0}")]
    TargetCreationError(String),

    /// A bulk submission failed wholesale (transport failure or non-2xx).
    #[error("Bulk transport error: {0}")]
    BulkTransportError(String),

    /// Failed to serialize a document or request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The engine returned a response that could not be parsed.
    #[error("Response parse error: {0}")]
    ResponseParseError(String),
}

impl EngineError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a target creation error.
    pub fn target_creation(msg: impl Into<String>) -> Self {
        Self::TargetCreationError(msg.into())
    }

    /// Create a bulk transport error.
    pub fn bulk_transport(msg: impl Into<String>) -> Self {
        Self::BulkTransportError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a response parse error.
    pub fn response_parse(msg: impl Into<String>) -> Self {
        Self::ResponseParseError(msg.into())
    }
}
