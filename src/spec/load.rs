//! Loading OpenAPI documents from disk or an in-memory value.

use super::build::build_operations;
use super::types::OperationMeta;
use anyhow::{bail, Context};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Parse an OpenAPI document from a YAML or JSON file and extract its
/// operations. The format is chosen by extension; anything that is not
/// `.json` is parsed as YAML (which also accepts JSON input).
pub fn load_spec<P: AsRef<Path>>(path: P) -> anyhow::Result<(Arc<Value>, Vec<OperationMeta>)> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;
    let doc: Value = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("invalid YAML in {}", path.display()))?
    };
    load_spec_from_value(doc)
}

/// Extract operations from an already-parsed OpenAPI document.
pub fn load_spec_from_value(doc: Value) -> anyhow::Result<(Arc<Value>, Vec<OperationMeta>)> {
    if doc.get("paths").is_none() {
        bail!("document has no `paths` object; is this an OpenAPI spec?");
    }
    let operations = build_operations(&doc);
    info!(routes = operations.len(), "loaded OpenAPI spec");
    Ok((Arc::new(doc), operations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            "openapi: 3.1.0\npaths:\n  /pets:\n    get:\n      responses:\n        '200':\n          description: ok\n"
        )
        .unwrap();
        let (doc, ops) = load_spec(file.path()).unwrap();
        assert_eq!(doc["openapi"], "3.1.0");
        assert_eq!(ops.len(), 1);
    }

    #[test]
    fn test_load_from_value_rejects_non_spec() {
        assert!(load_spec_from_value(json!({"not": "a spec"})).is_err());
    }
}
