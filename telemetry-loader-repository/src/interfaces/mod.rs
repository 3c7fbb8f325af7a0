//! Interface definitions for the engine boundary.
//!
//! This module defines the abstract `SearchEngineProvider` trait that
//! allows for dependency injection and swappable engine implementations.

mod search_engine_provider;

pub use search_engine_provider::SearchEngineProvider;
