use http::Method;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// One declared operation: an HTTP method bound to a URL path template.
#[derive(Debug, Clone)]
pub struct OperationMeta {
    pub method: Method,
    /// Path template as written in the spec, e.g. `/users/{id}`.
    pub path_pattern: String,
    pub operation_id: Option<String>,
    /// Parameter names appearing in the template, in order.
    pub path_params: Vec<String>,
    /// JSON request-body schema, refs un-resolved (the resolver inlines them
    /// at request time).
    pub request_schema: Option<Value>,
    pub request_body_required: bool,
    /// Declared responses keyed by the literal status string (`"200"`,
    /// `"default"`), in spec order.
    pub responses: IndexMap<String, ResponseSpec>,
    /// Per-operation generation overrides from vendor extensions.
    pub overrides: GenOverrides,
}

/// JSON content schema and example for one declared response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseSpec {
    pub schema: Option<Value>,
    pub example: Option<Value>,
}

/// Vendor-extension overrides consumed by the mock core:
/// `x-mock-count`, `x-mock-delay` (ms), `x-mock-seed`.
#[derive(Debug, Clone, Default)]
pub struct GenOverrides {
    /// Fixed element count for array-typed responses.
    pub count: Option<usize>,
    /// Fixed response delay in milliseconds.
    pub delay_ms: Option<u64>,
    /// Generate with a stable per-(path, method) seed.
    pub stable_seed: bool,
}

/// One registered route, exposed for display and diagnostics.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteInfo {
    pub method: String,
    pub path: String,
    pub operation_id: Option<String>,
}

impl OperationMeta {
    /// Collection key: the path template with parameter segments stripped.
    ///
    /// `/users/{id}` and `/users` both map to `/users`, so a `POST /users`
    /// followed by `GET /users/{id}` observe the same stored collection.
    #[must_use]
    pub fn collection_key(&self) -> String {
        let stripped: Vec<&str> = self
            .path_pattern
            .split('/')
            .filter(|seg| !seg.is_empty() && !seg.starts_with('{'))
            .collect();
        format!("/{}", stripped.join("/"))
    }

    /// Whether the template addresses a single item (contains a parameter).
    #[must_use]
    pub fn is_item_path(&self) -> bool {
        self.path_pattern.contains('{')
    }

    /// The path parameter treated as the resource identifier: the first whose
    /// name contains "id" (case-insensitive), else the last declared one.
    /// Best-effort when several id-like parameters exist on one route.
    #[must_use]
    pub fn id_param(&self) -> Option<&str> {
        self.path_params
            .iter()
            .find(|name| name.to_lowercase().contains("id"))
            .or_else(|| self.path_params.last())
            .map(String::as_str)
    }

    /// Success status by method convention.
    #[must_use]
    pub fn success_status(&self) -> u16 {
        if self.method == Method::POST {
            201
        } else {
            200
        }
    }

    /// Response selected for the success path:
    /// `responses[success] ?? responses["200"] ?? responses["default"]`.
    #[must_use]
    pub fn success_response(&self) -> Option<&ResponseSpec> {
        self.responses
            .get(self.success_status().to_string().as_str())
            .or_else(|| self.responses.get("200"))
            .or_else(|| self.responses.get("default"))
    }

    /// Stable seed for this (path, method) pair, used by `x-mock-seed`.
    #[must_use]
    pub fn stable_seed(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.method.as_str().hash(&mut hasher);
        self.path_pattern.hash(&mut hasher);
        hasher.finish()
    }

    /// Diagnostics entry for this operation.
    #[must_use]
    pub fn route_info(&self) -> RouteInfo {
        RouteInfo {
            method: self.method.to_string(),
            path: self.path_pattern.clone(),
            operation_id: self.operation_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(method: Method, path: &str, params: &[&str]) -> OperationMeta {
        OperationMeta {
            method,
            path_pattern: path.to_string(),
            operation_id: None,
            path_params: params.iter().map(|p| p.to_string()).collect(),
            request_schema: None,
            request_body_required: false,
            responses: IndexMap::new(),
            overrides: GenOverrides::default(),
        }
    }

    #[test]
    fn test_collection_key_strips_params() {
        assert_eq!(
            op(Method::GET, "/users/{id}", &["id"]).collection_key(),
            "/users"
        );
        assert_eq!(op(Method::GET, "/users", &[]).collection_key(), "/users");
        assert_eq!(
            op(Method::GET, "/orgs/{orgId}/users/{userId}", &["orgId", "userId"]).collection_key(),
            "/orgs/users"
        );
    }

    #[test]
    fn test_id_param_prefers_id_like_names() {
        assert_eq!(
            op(Method::GET, "/users/{userId}", &["userId"]).id_param(),
            Some("userId")
        );
        assert_eq!(
            op(Method::GET, "/books/{isbn}/pages/{num}", &["isbn", "num"]).id_param(),
            Some("num")
        );
    }

    #[test]
    fn test_success_status_by_method() {
        assert_eq!(op(Method::POST, "/users", &[]).success_status(), 201);
        assert_eq!(op(Method::GET, "/users", &[]).success_status(), 200);
        assert_eq!(op(Method::DELETE, "/users", &[]).success_status(), 200);
    }

    #[test]
    fn test_stable_seed_differs_by_route() {
        let a = op(Method::GET, "/users", &[]).stable_seed();
        let b = op(Method::GET, "/pets", &[]).stable_seed();
        let c = op(Method::POST, "/users", &[]).stable_seed();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, op(Method::GET, "/users", &[]).stable_seed());
    }
}
