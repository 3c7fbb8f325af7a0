//! OpenSearch implementation of the engine provider.
//!
//! This module provides a concrete implementation of
//! `SearchEngineProvider` using the OpenSearch Rust client.

mod client;
mod index_defaults;

pub use client::OpenSearchProvider;
pub use index_defaults::{default_index_body, merge_index_body, DEFAULT_TOTAL_FIELDS_LIMIT};
