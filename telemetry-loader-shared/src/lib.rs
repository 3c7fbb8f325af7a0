//! # Telemetry Loader Shared
//!
//! Shared types used across the telemetry loader crates: index targets
//! and ingestion reports.

pub mod report;
pub mod target;

pub use report::IngestionReport;
pub use target::{IndexTarget, TargetKind};
