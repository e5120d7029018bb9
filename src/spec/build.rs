//! Extraction of operation metadata from a parsed OpenAPI document.
//!
//! Works directly on the `serde_json::Value` document so loosely-conforming
//! specs still serve; anything unrecognized is skipped rather than fatal.

use super::types::{GenOverrides, OperationMeta, ResponseSpec};
use http::Method;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

const METHODS: [(&str, Method); 8] = [
    ("get", Method::GET),
    ("post", Method::POST),
    ("put", Method::PUT),
    ("delete", Method::DELETE),
    ("patch", Method::PATCH),
    ("options", Method::OPTIONS),
    ("head", Method::HEAD),
    ("trace", Method::TRACE),
];

/// Build operation metadata for every (path, method) pair declared in `doc`.
///
/// Unknown verbs and non-object operation entries are skipped with a warning.
pub fn build_operations(doc: &Value) -> Vec<OperationMeta> {
    let mut operations = Vec::new();
    let paths = match doc.get("paths").and_then(Value::as_object) {
        Some(paths) => paths,
        None => return operations,
    };

    for (path, item) in paths {
        let item = match item.as_object() {
            Some(item) => item,
            None => {
                warn!(path = %path, "skipping non-object path item");
                continue;
            }
        };
        for (verb, method) in METHODS {
            let operation = match item.get(verb).and_then(Value::as_object) {
                Some(op) => op,
                None => continue,
            };
            let (request_schema, request_body_required) = extract_request_schema(operation);
            operations.push(OperationMeta {
                method: method.clone(),
                path_pattern: path.clone(),
                operation_id: operation
                    .get("operationId")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                path_params: template_params(path),
                request_schema,
                request_body_required,
                responses: extract_responses(operation),
                overrides: extract_overrides(operation),
            });
            debug!(method = %method, path = %path, "operation registered");
        }
    }
    operations
}

/// Parameter names appearing in a path template, in order.
fn template_params(path: &str) -> Vec<String> {
    path.split('/')
        .filter_map(|seg| {
            seg.strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .map(str::to_string)
        })
        .collect()
}

/// Request-body JSON schema and required flag.
fn extract_request_schema(operation: &serde_json::Map<String, Value>) -> (Option<Value>, bool) {
    let body = match operation.get("requestBody") {
        Some(body) => body,
        None => return (None, false),
    };
    let required = body
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let schema = json_content_schema(body);
    (schema, required)
}

/// All declared responses, preferring `application/json` content per status.
fn extract_responses(operation: &serde_json::Map<String, Value>) -> IndexMap<String, ResponseSpec> {
    let mut out = IndexMap::new();
    let responses = match operation.get("responses").and_then(Value::as_object) {
        Some(responses) => responses,
        None => return out,
    };
    for (status, response) in responses {
        let schema = json_content_schema(response);
        let example = json_content_example(response);
        out.insert(status.clone(), ResponseSpec { schema, example });
    }
    out
}

/// The schema under `content.application/json` (falling back to the first
/// media type carrying one).
fn json_content_schema(node: &Value) -> Option<Value> {
    let content = node.get("content").and_then(Value::as_object)?;
    content
        .get("application/json")
        .or_else(|| content.values().next())?
        .get("schema")
        .cloned()
}

fn json_content_example(node: &Value) -> Option<Value> {
    let media = node
        .get("content")
        .and_then(Value::as_object)?
        .get("application/json")?;
    media.get("example").cloned().or_else(|| {
        media
            .get("examples")
            .and_then(Value::as_object)?
            .values()
            .find_map(|ex| ex.get("value").cloned())
    })
}

/// Vendor extensions consumed by the mock core.
fn extract_overrides(operation: &serde_json::Map<String, Value>) -> GenOverrides {
    GenOverrides {
        count: operation
            .get("x-mock-count")
            .and_then(Value::as_u64)
            .map(|n| n as usize),
        delay_ms: operation.get("x-mock-delay").and_then(Value::as_u64),
        stable_seed: operation
            .get("x-mock-seed")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_operations_basic() {
        let doc = json!({
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "list_pets",
                        "responses": {"200": {"content": {"application/json": {
                            "schema": {"type": "array", "items": {"type": "object"}}
                        }}}}
                    },
                    "post": {
                        "requestBody": {
                            "required": true,
                            "content": {"application/json": {"schema": {"type": "object"}}}
                        },
                        "responses": {"201": {"description": "created"}}
                    },
                    "subscribe": {"comment": "not a verb"}
                }
            }
        });
        let ops = build_operations(&doc);
        assert_eq!(ops.len(), 2);
        let get = ops.iter().find(|o| o.method == Method::GET).unwrap();
        assert_eq!(get.operation_id.as_deref(), Some("list_pets"));
        assert!(get.responses["200"].schema.is_some());
        let post = ops.iter().find(|o| o.method == Method::POST).unwrap();
        assert!(post.request_body_required);
        assert!(post.request_schema.is_some());
    }

    #[test]
    fn test_template_params() {
        assert_eq!(
            template_params("/orgs/{orgId}/users/{userId}"),
            vec!["orgId", "userId"]
        );
        assert!(template_params("/plain/path").is_empty());
    }

    #[test]
    fn test_overrides() {
        let doc = json!({
            "paths": {"/widgets": {"get": {
                "x-mock-count": 3,
                "x-mock-delay": 250,
                "x-mock-seed": true,
                "responses": {}
            }}}
        });
        let ops = build_operations(&doc);
        assert_eq!(ops[0].overrides.count, Some(3));
        assert_eq!(ops[0].overrides.delay_ms, Some(250));
        assert!(ops[0].overrides.stable_seed);
    }

    #[test]
    fn test_response_example_extracted() {
        let doc = json!({
            "paths": {"/things": {"get": {
                "responses": {"200": {"content": {"application/json": {
                    "schema": {"type": "object"},
                    "example": {"fixed": true}
                }}}}
            }}}
        });
        let ops = build_operations(&doc);
        assert_eq!(ops[0].responses["200"].example, Some(json!({"fixed": true})));
    }
}
