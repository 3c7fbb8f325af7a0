//! Index target types.
//!
//! A target identifies where documents are written: a plain index or a
//! log data stream. The distinction matters twice: data streams are
//! created through the data-stream admin APIs, and they only accept
//! `create` write operations.

use serde::{Deserialize, Serialize};

/// Name prefix that marks a target as a log data stream.
pub const LOG_STREAM_PREFIX: &str = "logs-";

/// Kind of destination a bulk write goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// A regular index.
    Index,
    /// A time-series log data stream.
    DataStream,
}

/// A named bulk-write destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTarget {
    /// Index or data-stream name.
    pub name: String,
    /// Whether this target is a plain index or a data stream.
    pub kind: TargetKind,
}

impl IndexTarget {
    /// Create a target, detecting the kind from the name.
    ///
    /// Names starting with `logs-` follow the log data stream naming
    /// convention and are treated as data streams; everything else is a
    /// plain index.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = if name.starts_with(LOG_STREAM_PREFIX) {
            TargetKind::DataStream
        } else {
            TargetKind::Index
        };
        Self { name, kind }
    }

    /// Create a plain index target regardless of the name.
    pub fn index(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TargetKind::Index,
        }
    }

    /// Create a data-stream target regardless of the name.
    pub fn data_stream(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TargetKind::DataStream,
        }
    }

    /// Whether this target is a data stream.
    pub fn is_data_stream(&self) -> bool {
        self.kind == TargetKind::DataStream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_prefix_detects_data_stream() {
        let target = IndexTarget::from_name("logs-endpoint.events-default");
        assert_eq!(target.kind, TargetKind::DataStream);
        assert!(target.is_data_stream());
    }

    #[test]
    fn test_plain_name_detects_index() {
        let target = IndexTarget::from_name("security-alerts");
        assert_eq!(target.kind, TargetKind::Index);
        assert!(!target.is_data_stream());
    }

    #[test]
    fn test_explicit_constructors_override_prefix() {
        let target = IndexTarget::index("logs-but-actually-an-index");
        assert_eq!(target.kind, TargetKind::Index);

        let target = IndexTarget::data_stream("alerts");
        assert_eq!(target.kind, TargetKind::DataStream);
    }
}
