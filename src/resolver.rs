//! # Schema Resolver Module
//!
//! Resolves JSON Schema `$ref` pointers against the OpenAPI document root and
//! inlines them into a self-contained schema tree.
//!
//! Resolution is recursive: a resolved node's `properties`, `items`,
//! `additionalProperties` and composition lists (`allOf`/`oneOf`/`anyOf`) are
//! resolved before the node is returned. Results are memoized by the literal
//! reference string in a resolver-owned cache, so repeated references to the
//! same type are resolved once per resolver lifetime.
//!
//! ## Cyclic schemas
//!
//! A `$ref` that is already being resolved higher on the current call stack is
//! left un-inlined. The back-edge survives as a raw `$ref` node and the value
//! generator re-resolves it lazily while descending, so termination is
//! guaranteed by the generator's depth budget rather than by cycle detection
//! here. Resolving a cyclic schema is therefore legal; only generating from it
//! is bounded.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while resolving schema references.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A `$ref` path segment could not be found in the spec document.
    #[error("unresolved schema reference: {0}")]
    UnresolvedReference(String),
    /// A `$ref` pointing outside the spec document (no `#` prefix).
    #[error("external schema references are not supported: {0}")]
    ExternalReference(String),
}

/// Resolves `$ref` pointers against a single OpenAPI document.
///
/// The cache is owned by the resolver instance, not a process-wide global, so
/// multiple independent server instances can coexist in one process.
pub struct SchemaResolver {
    root: Arc<Value>,
    cache: Mutex<HashMap<String, Arc<Value>>>,
}

impl SchemaResolver {
    /// Create a resolver rooted at the given spec document.
    #[must_use]
    pub fn new(root: Arc<Value>) -> Self {
        SchemaResolver {
            root,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve all references reachable from `schema`, returning an inlined copy.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnresolvedReference`] when a reference cannot be
    /// navigated from the document root.
    pub fn resolve(&self, schema: &Value) -> Result<Value, ResolveError> {
        let mut in_flight = Vec::new();
        self.resolve_inner(schema, &mut in_flight)
    }

    fn resolve_inner(
        &self,
        value: &Value,
        in_flight: &mut Vec<String>,
    ) -> Result<Value, ResolveError> {
        let obj = match value {
            Value::Object(obj) => obj,
            _ => return Ok(value.clone()),
        };

        if let Some(ref_path) = obj.get("$ref").and_then(Value::as_str) {
            if in_flight.iter().any(|r| r == ref_path) {
                // Cycle: leave the back-edge for the generator to resolve lazily.
                debug!(reference = %ref_path, "cyclic reference left un-inlined");
                return Ok(value.clone());
            }
            if let Some(hit) = self.cache.lock().get(ref_path) {
                return Ok((**hit).clone());
            }
            let target = self.lookup(ref_path)?;
            in_flight.push(ref_path.to_string());
            let resolved = self.resolve_inner(&target, in_flight);
            in_flight.pop();
            let resolved = resolved?;
            self.cache
                .lock()
                .insert(ref_path.to_string(), Arc::new(resolved.clone()));
            return Ok(resolved);
        }

        let mut out = obj.clone();
        if let Some(Value::Object(props)) = obj.get("properties") {
            let mut resolved_props = props.clone();
            for (name, prop) in props {
                resolved_props.insert(name.clone(), self.resolve_inner(prop, in_flight)?);
            }
            out.insert("properties".to_string(), Value::Object(resolved_props));
        }
        for key in ["items", "additionalProperties"] {
            if let Some(child) = obj.get(key) {
                if child.is_object() {
                    out.insert(key.to_string(), self.resolve_inner(child, in_flight)?);
                }
            }
        }
        for key in ["allOf", "oneOf", "anyOf"] {
            if let Some(Value::Array(subs)) = obj.get(key) {
                let resolved: Result<Vec<Value>, ResolveError> = subs
                    .iter()
                    .map(|s| self.resolve_inner(s, in_flight))
                    .collect();
                out.insert(key.to_string(), Value::Array(resolved?));
            }
        }
        Ok(Value::Object(out))
    }

    /// Navigate a `#/slash/separated/path` from the document root.
    fn lookup(&self, ref_path: &str) -> Result<Value, ResolveError> {
        let pointer = ref_path
            .strip_prefix('#')
            .ok_or_else(|| ResolveError::ExternalReference(ref_path.to_string()))?;

        let mut current: &Value = &self.root;
        for segment in pointer.trim_start_matches('/').split('/') {
            // JSON pointer escapes per RFC 6901
            let segment = segment.replace("~1", "/").replace("~0", "~");
            current = match current {
                Value::Object(map) => map.get(&segment),
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| items.get(idx)),
                _ => None,
            }
            .ok_or_else(|| ResolveError::UnresolvedReference(ref_path.to_string()))?;
        }
        Ok(current.clone())
    }
}
