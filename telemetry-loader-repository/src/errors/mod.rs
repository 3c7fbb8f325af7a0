//! Error types for the telemetry loader repository.

mod engine_error;

pub use engine_error::EngineError;
