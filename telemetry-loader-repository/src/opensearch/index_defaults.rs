//! Default index settings and mappings for telemetry targets.
//!
//! Security documents are wide and irregularly shaped, so freshly created
//! indices get a generous total-field limit and a dynamic template that
//! maps unrecognized string fields to `keyword`.

use serde_json::{json, Map, Value};

/// Default ceiling on the number of mapped fields per index.
pub const DEFAULT_TOTAL_FIELDS_LIMIT: u64 = 10_000;

/// The default creation body applied to every new index.
pub fn default_index_body() -> Value {
    json!({
        "settings": {
            "index.mapping.total_fields.limit": DEFAULT_TOTAL_FIELDS_LIMIT
        },
        "mappings": {
            "dynamic_templates": [
                {
                    "strings_as_keyword": {
                        "match_mapping_type": "string",
                        "mapping": {
                            "type": "keyword",
                            "ignore_above": 1024
                        }
                    }
                }
            ]
        }
    })
}

/// Merge caller-supplied mappings and settings over the defaults.
///
/// Caller keys win on conflict; keys the caller does not mention keep
/// their default values.
pub fn merge_index_body(mappings: Option<Value>, settings: Option<Value>) -> Value {
    let mut body = default_index_body();

    if let Some(mappings) = mappings {
        merge_objects(&mut body["mappings"], mappings);
    }
    if let Some(settings) = settings {
        merge_objects(&mut body["settings"], settings);
    }

    body
}

/// Shallow-merge `overlay` into `base`, overlay keys winning.
fn merge_objects(base: &mut Value, overlay: Value) {
    match (base.as_object_mut(), overlay) {
        (Some(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                base_map.insert(key, value);
            }
        }
        (_, overlay) => {
            if !overlay.is_null() {
                *base = overlay;
            }
        }
    }
}

/// Build a mappings object from a plain `field -> type` property map.
pub fn mappings_from_properties(properties: Map<String, Value>) -> Value {
    json!({ "properties": properties })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_body_structure() {
        let body = default_index_body();

        assert_eq!(
            body["settings"]["index.mapping.total_fields.limit"],
            DEFAULT_TOTAL_FIELDS_LIMIT
        );
        assert!(body["mappings"]["dynamic_templates"].is_array());
    }

    #[test]
    fn test_merge_preserves_defaults() {
        let body = merge_index_body(
            Some(json!({"properties": {"event.category": {"type": "keyword"}}})),
            None,
        );

        assert_eq!(
            body["settings"]["index.mapping.total_fields.limit"],
            DEFAULT_TOTAL_FIELDS_LIMIT
        );
        assert_eq!(
            body["mappings"]["properties"]["event.category"]["type"],
            "keyword"
        );
        assert!(body["mappings"]["dynamic_templates"].is_array());
    }

    #[test]
    fn test_merge_caller_settings_win() {
        let body = merge_index_body(
            None,
            Some(json!({"index.mapping.total_fields.limit": 25_000, "number_of_shards": 3})),
        );

        assert_eq!(body["settings"]["index.mapping.total_fields.limit"], 25_000);
        assert_eq!(body["settings"]["number_of_shards"], 3);
    }

    #[test]
    fn test_mappings_from_properties() {
        let mut properties = Map::new();
        properties.insert("@timestamp".to_string(), json!({"type": "date"}));

        let mappings = mappings_from_properties(properties);
        assert_eq!(mappings["properties"]["@timestamp"]["type"], "date");
    }
}
