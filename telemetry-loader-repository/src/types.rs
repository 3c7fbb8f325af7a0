//! Bulk request and response types.

use serde::Serialize;
use serde_json::{json, Value};

use telemetry_loader_shared::IndexTarget;

/// The write semantics of a single bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkActionKind {
    /// Overwrite semantics: an existing document with the same id is
    /// replaced.
    Index,
    /// Fail-if-exists semantics; required for data-stream writes.
    Create,
}

/// Operation descriptor for one document in a bulk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkAction {
    /// Index-vs-create semantics.
    pub kind: BulkActionKind,
    /// Explicit document id; when `None`, the engine assigns one.
    pub id: Option<String>,
}

impl BulkAction {
    /// An `index` action with no explicit id.
    pub fn index() -> Self {
        Self {
            kind: BulkActionKind::Index,
            id: None,
        }
    }

    /// A `create` action with no explicit id.
    pub fn create() -> Self {
        Self {
            kind: BulkActionKind::Create,
            id: None,
        }
    }

    /// Attach an explicit document id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The default action for a target: `create` for data streams (which
    /// reject plain `index` writes), `index` otherwise.
    pub fn default_for(target: &IndexTarget) -> Self {
        if target.is_data_stream() {
            Self::create()
        } else {
            Self::index()
        }
    }

    /// Resolve this action against a target, forcing `create` for data
    /// streams.
    pub fn resolve_for(self, target: &IndexTarget) -> Self {
        if target.is_data_stream() {
            Self {
                kind: BulkActionKind::Create,
                id: self.id,
            }
        } else {
            self
        }
    }

    /// Build the operation header line for the bulk body.
    pub fn header(&self, target_name: &str) -> Value {
        let verb = match self.kind {
            BulkActionKind::Index => "index",
            BulkActionKind::Create => "create",
        };
        let mut meta = json!({ "_index": target_name });
        if let Some(ref id) = self.id {
            meta["_id"] = json!(id);
        }
        json!({ verb: meta })
    }
}

/// A complete bulk submission: target, ordered operations, and options.
#[derive(Debug, Clone)]
pub struct BulkRequest {
    /// Destination index or data stream.
    pub target: IndexTarget,
    /// Ordered (operation, document) pairs. The header for operation N is
    /// immediately followed by document N in the flat bulk body.
    pub operations: Vec<(BulkAction, Value)>,
    /// Force near-real-time visibility of the written documents.
    pub refresh: bool,
    /// Optional ingest pipeline to route the documents through.
    pub pipeline: Option<String>,
}

impl BulkRequest {
    /// Create a request with no refresh and no pipeline.
    pub fn new(target: IndexTarget, operations: Vec<(BulkAction, Value)>) -> Self {
        Self {
            target,
            operations,
            refresh: false,
            pipeline: None,
        }
    }

    /// Number of documents in the request.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the request carries no documents.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Build the flat alternating header/document body.
    pub fn body_lines(&self) -> Vec<Value> {
        let mut lines = Vec::with_capacity(self.operations.len() * 2);
        for (action, doc) in &self.operations {
            lines.push(action.header(&self.target.name));
            lines.push(doc.clone());
        }
        lines
    }
}

/// One individually failed item from a bulk response.
#[derive(Debug, Clone, Serialize)]
pub struct BulkItemFailure {
    /// Zero-based position of the item within the request.
    pub position: usize,
    /// The action verb the engine reported the failure under.
    pub action: String,
    /// Document id, when the engine echoed one.
    pub id: Option<String>,
    /// HTTP-style status for the item.
    pub status: Option<u64>,
    /// The raw error object as reported by the engine.
    pub error: Value,
}

/// Parsed outcome of a bulk submission.
///
/// Carries the engine's top-level error flag and the raw per-item outcome
/// array. Items are kept raw so callers can log exactly what the engine
/// said.
#[derive(Debug, Clone, Default)]
pub struct BulkResponse {
    /// True when at least one item failed.
    pub errors: bool,
    /// Raw per-item outcome entries, in request order.
    pub items: Vec<Value>,
}

impl BulkResponse {
    /// Parse a raw bulk response body.
    ///
    /// Tolerant of missing fields: an absent `errors` flag reads as false
    /// and an absent `items` array as empty, matching how the engine
    /// behaves on wholly successful requests.
    pub fn from_value(body: &Value) -> Self {
        let errors = body
            .get("errors")
            .and_then(|e| e.as_bool())
            .unwrap_or(false);
        let items = body
            .get("items")
            .and_then(|i| i.as_array())
            .cloned()
            .unwrap_or_default();
        Self { errors, items }
    }

    /// Number of per-item outcomes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the response carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The raw entries of the items that individually failed, exactly as
    /// the engine reported them.
    pub fn failed_items(&self) -> Vec<Value> {
        self.items
            .iter()
            .filter(|item| {
                item.as_object()
                    .and_then(|obj| obj.values().next())
                    .and_then(|body| body.get("error"))
                    .map(|error| !error.is_null())
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// Extract the items that individually failed.
    ///
    /// Each bulk item is a single-key object keyed by the action verb;
    /// an item failed when its body carries an `error` object.
    pub fn failures(&self) -> Vec<BulkItemFailure> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                let (action, body) = item.as_object()?.iter().next()?;
                let error = body.get("error")?;
                if error.is_null() {
                    return None;
                }
                Some(BulkItemFailure {
                    position,
                    action: action.clone(),
                    id: body.get("_id").and_then(|v| v.as_str()).map(String::from),
                    status: body.get("status").and_then(|s| s.as_u64()),
                    error: error.clone(),
                })
            })
            .collect()
    }
}
