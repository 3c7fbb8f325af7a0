//! Bulk response auditing.
//!
//! Both ingestors continue past partial failures; this module is where
//! those failures become visible. Strictly observability: the decision
//! to continue or abort belongs to the ingestor, not the auditor.

use tracing::warn;

use telemetry_loader_repository::BulkResponse;

/// Log the individually failed items of a bulk response.
///
/// No-op when the response's error flag is false. Otherwise each failed
/// item is logged once, together with the caller-supplied context.
/// Never raises.
pub fn audit_bulk_response(response: &BulkResponse, context: &str) {
    if !response.errors {
        return;
    }

    let failures = response.failures();
    warn!(
        context = %context,
        failed = failures.len(),
        total = response.len(),
        "Bulk response reported item failures"
    );

    for failure in &failures {
        warn!(
            context = %context,
            position = failure.position,
            action = %failure.action,
            id = ?failure.id,
            status = ?failure.status,
            error = %failure.error,
            "Bulk item failed"
        );
    }
}
