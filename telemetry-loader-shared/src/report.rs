//! Ingestion report types.

use serde_json::Value;

/// Accumulated outcome of one ingestion run.
///
/// Created fresh per call and handed back to the caller; never persisted.
/// `failures` holds the raw per-item error entries exactly as the engine
/// reported them, so callers can log or inspect them without re-querying.
#[derive(Debug, Clone, Default)]
pub struct IngestionReport {
    /// Number of documents submitted to the engine.
    pub attempted: usize,
    /// Number of items the engine reported as failed.
    pub failed: usize,
    /// Raw failure entries from the bulk responses.
    pub failures: Vec<Value>,
}

impl IngestionReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents the engine acknowledged.
    pub fn succeeded(&self) -> usize {
        self.attempted.saturating_sub(self.failed)
    }

    /// Whether every submitted document was acknowledged.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    /// Fold another report's counts into this one.
    pub fn merge(&mut self, other: IngestionReport) {
        self.attempted += other.attempted;
        self.failed += other.failed;
        self.failures.extend(other.failures);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_report_is_complete() {
        let report = IngestionReport::new();
        assert!(report.is_complete());
        assert_eq!(report.succeeded(), 0);
    }

    #[test]
    fn test_merge_accumulates() {
        let mut report = IngestionReport {
            attempted: 10,
            failed: 1,
            failures: vec![json!({"error": {"type": "mapper_parsing_exception"}})],
        };
        report.merge(IngestionReport {
            attempted: 5,
            failed: 0,
            failures: vec![],
        });

        assert_eq!(report.attempted, 15);
        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded(), 14);
        assert!(!report.is_complete());
        assert_eq!(report.failures.len(), 1);
    }
}
