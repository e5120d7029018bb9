//! Per-operation request handling: response assembly, stateful CRUD, and the
//! stateless generation path.
//!
//! A [`MockHandler`] is a pure function from [`MockRequest`] to
//! [`MockResponse`]. It owns no transport; artificial delay is returned as a
//! hint for the mounting layer to apply, so the core never sleeps.

use crate::config::MockConfig;
use crate::generator::{GenContext, Generator};
use crate::resolver::SchemaResolver;
use crate::spec::OperationMeta;
use crate::store::StateStore;
use crate::validator::{validate_body, FieldError};
use http::Method;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// An inbound request, already matched to an operation by the router layer.
#[derive(Debug, Clone, Default)]
pub struct MockRequest {
    /// Path parameters bound from the template, e.g. `{"petId": "42"}`.
    pub path_params: HashMap<String, String>,
    pub query_params: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    /// Parsed JSON body, when the request carried one.
    pub body: Option<Value>,
}

impl MockRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The assembled response. `delay_ms` is a hint the mounting transport
/// applies with its own timer; the core never blocks on it.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: u16,
    pub body: Option<Value>,
    pub delay_ms: Option<u64>,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        MockResponse {
            status,
            body: Some(body),
            delay_ms: None,
        }
    }

    pub fn empty(status: u16) -> Self {
        MockResponse {
            status,
            body: None,
            delay_ms: None,
        }
    }

    fn with_delay(mut self, delay_ms: Option<u64>) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Handler for exactly one declared operation.
pub struct MockHandler {
    op: Arc<OperationMeta>,
    resolver: Arc<SchemaResolver>,
    generator: Generator,
    store: Arc<StateStore>,
    config: Arc<MockConfig>,
}

impl MockHandler {
    pub fn new(
        op: Arc<OperationMeta>,
        resolver: Arc<SchemaResolver>,
        store: Arc<StateStore>,
        config: Arc<MockConfig>,
    ) -> Self {
        let generator = Generator::new(Arc::clone(&resolver));
        MockHandler {
            op,
            resolver,
            generator,
            store,
            config,
        }
    }

    pub fn operation(&self) -> &OperationMeta {
        &self.op
    }

    /// Handle one request. Never panics toward the caller: any internal
    /// error is logged and mapped to a generic 500.
    pub fn handle(&self, req: &MockRequest) -> MockResponse {
        match self.try_handle(req) {
            Ok(response) => response,
            Err(err) => {
                error!(
                    method = %self.op.method,
                    path = %self.op.path_pattern,
                    error = %err,
                    "handler failed"
                );
                MockResponse::json(500, json!({ "error": "internal_error" }))
            }
        }
    }

    fn try_handle(&self, req: &MockRequest) -> anyhow::Result<MockResponse> {
        if self.config.auth_required
            && req.header("authorization").is_none()
            && req.header("x-api-key").is_none()
        {
            return Ok(MockResponse::json(401, json!({ "error": "unauthorized" })));
        }

        let mut rng = self.rng();
        let delay = self.delay_hint(&mut rng);

        if self.config.error_rate > 0 && rng.gen_range(0..100u8) < self.config.error_rate {
            debug!(path = %self.op.path_pattern, "injecting error response");
            return Ok(
                MockResponse::json(500, json!({ "error": "injected" })).with_delay(delay)
            );
        }

        if let Some(response) = self.validate_request(req)? {
            return Ok(response.with_delay(delay));
        }

        let response = if self.config.stateful {
            self.handle_stateful(req, &mut rng)?
        } else {
            self.handle_stateless(req, &mut rng)?
        };
        Ok(response.with_delay(delay))
    }

    /// Per-request random source. An `x-mock-seed` flag pins this operation
    /// to a stable per-route seed; deterministic mode uses the configured
    /// seed; otherwise fresh entropy.
    fn rng(&self) -> StdRng {
        if self.op.overrides.stable_seed {
            StdRng::seed_from_u64(self.op.stable_seed())
        } else if self.config.deterministic {
            StdRng::seed_from_u64(self.config.seed.unwrap_or(MockConfig::DEFAULT_SEED))
        } else {
            StdRng::from_entropy()
        }
    }

    fn delay_hint(&self, rng: &mut StdRng) -> Option<u64> {
        self.op.overrides.delay_ms.or_else(|| {
            self.config
                .delay_ms
                .map(|(lo, hi)| rng.gen_range(lo..=hi.max(lo)))
        })
    }

    /// Validate a write-method body against the declared request schema.
    /// Returns a 400 response when validation fails, `None` to proceed.
    fn validate_request(&self, req: &MockRequest) -> anyhow::Result<Option<MockResponse>> {
        let schema = match &self.op.request_schema {
            Some(schema) => schema,
            None => return Ok(None),
        };
        let body = match &req.body {
            Some(body) => body,
            None => {
                if self.op.request_body_required {
                    let missing = vec![FieldError {
                        field: "/".to_string(),
                        message: "request body is required".to_string(),
                    }];
                    return Ok(Some(MockResponse::json(
                        400,
                        FieldError::to_details(&missing),
                    )));
                }
                return Ok(None);
            }
        };
        let resolved = self.resolver.resolve(schema)?;
        match validate_body(&resolved, body) {
            Ok(errors) if errors.is_empty() => Ok(None),
            Ok(errors) => Ok(Some(MockResponse::json(
                400,
                FieldError::to_details(&errors),
            ))),
            // Uncompilable schema: already logged, let the request through.
            Err(_) => Ok(None),
        }
    }

    // ---- stateful branch -------------------------------------------------

    fn handle_stateful(
        &self,
        req: &MockRequest,
        rng: &mut StdRng,
    ) -> anyhow::Result<MockResponse> {
        let collection = self.op.collection_key();
        let item_id = self
            .op
            .id_param()
            .and_then(|name| req.path_params.get(name))
            .cloned();

        match (self.op.method.as_str(), item_id) {
            // Item reads never seed: only the collection listing does, so an
            // unknown id cannot fabricate items out of its object schema.
            ("GET", Some(id)) => Ok(match self.store.get_by_id(&collection, &id) {
                Some(item) => MockResponse::json(200, item),
                None => not_found(),
            }),
            ("GET", None) => {
                self.auto_seed(&collection, rng)?;
                Ok(MockResponse::json(
                    200,
                    Value::Array(self.store.get_all(&collection)),
                ))
            }
            ("POST", _) => {
                let input = req.body.clone().unwrap_or_else(|| json!({}));
                let created = self.store.create(&collection, input);
                Ok(MockResponse::json(201, created))
            }
            ("PUT", Some(id)) | ("PATCH", Some(id)) => {
                let patch = req.body.clone().unwrap_or_else(|| json!({}));
                Ok(match self.store.update(&collection, &id, patch) {
                    Some(item) => MockResponse::json(200, item),
                    None => not_found(),
                })
            }
            ("DELETE", Some(id)) => Ok(if self.store.delete(&collection, &id) {
                MockResponse::empty(204)
            } else {
                not_found()
            }),
            // No CRUD meaning for this shape; generate instead.
            _ => self.handle_stateless(req, rng),
        }
    }

    /// Populate an empty collection once per store lifetime: generate a batch
    /// from the success schema and give every item a fresh id.
    fn auto_seed(&self, collection: &str, rng: &mut StdRng) -> anyhow::Result<()> {
        if self.store.is_seeded(collection) {
            return Ok(());
        }
        let schema = self
            .op
            .success_response()
            .and_then(|response| response.schema.as_ref());
        let schema = match schema {
            Some(schema) => schema,
            None => return Ok(()),
        };
        let resolved = self.resolver.resolve(schema)?;
        let generated = self.generator.generate(&resolved, &GenContext::root(), rng);
        let mut items = match generated {
            Value::Array(items) => items,
            other => vec![other],
        };
        if let Some(count) = self.op.overrides.count {
            items = self.pad_to_count(items, &resolved, count, rng);
        }
        for item in &mut items {
            if let Some(obj) = item.as_object_mut() {
                obj.insert("id".into(), json!(uuid::Uuid::new_v4().to_string()));
            }
        }
        self.store.seed(collection, items);
        Ok(())
    }

    // ---- stateless branch ------------------------------------------------

    fn handle_stateless(
        &self,
        req: &MockRequest,
        rng: &mut StdRng,
    ) -> anyhow::Result<MockResponse> {
        let status = self.op.success_status();
        let response = match self.op.success_response() {
            Some(response) => response,
            None => return Ok(MockResponse::empty(204)),
        };
        if let Some(example) = &response.example {
            return Ok(MockResponse::json(status, example.clone()));
        }
        let schema = match &response.schema {
            Some(schema) => schema,
            None => {
                // DELETE without a declared body is a plain 204; anything
                // else answers with an empty JSON object.
                if self.op.method == Method::DELETE {
                    return Ok(MockResponse::empty(204));
                }
                return Ok(MockResponse::json(status, json!({})));
            }
        };
        let resolved = self.resolver.resolve(schema)?;
        let value = self.generator.generate(&resolved, &GenContext::root(), rng);

        let value = match value {
            Value::Array(items) => {
                let items = match self.op.overrides.count {
                    Some(count) => self.pad_to_count(items, &resolved, count, rng),
                    None => items,
                };
                Value::Array(items)
            }
            Value::Object(mut obj) => {
                self.inject_path_params(&mut obj, &req.path_params);
                if matches!(self.op.method.as_str(), "POST" | "PUT" | "PATCH") {
                    if let Some(Value::Object(body)) = &req.body {
                        for (key, val) in body {
                            obj.insert(key.clone(), val.clone());
                        }
                    }
                }
                Value::Object(obj)
            }
            other => other,
        };
        Ok(MockResponse::json(status, value))
    }

    /// Force an array to exactly `count` elements, generating extras from the
    /// array's item schema.
    fn pad_to_count(
        &self,
        mut items: Vec<Value>,
        array_schema: &Value,
        count: usize,
        rng: &mut StdRng,
    ) -> Vec<Value> {
        items.truncate(count);
        if let Some(item_schema) = array_schema.get("items") {
            while items.len() < count {
                let ctx = GenContext::root().element(items.len());
                items.push(self.generator.generate(item_schema, &ctx, rng));
            }
        }
        items
    }

    /// Reflect bound path parameters into id-like keys of a generated object,
    /// so `GET /pets/42` answers with `id: "42"`.
    fn inject_path_params(&self, obj: &mut Map<String, Value>, params: &HashMap<String, String>) {
        if params.is_empty() {
            return;
        }
        let fallback = self
            .op
            .id_param()
            .and_then(|name| params.get(name));
        for (key, slot) in obj.iter_mut() {
            if key == "id" || key.ends_with("Id") {
                if let Some(value) = params.get(key).or(fallback) {
                    *slot = json!(value);
                }
            }
        }
    }
}

fn not_found() -> MockResponse {
    MockResponse::json(404, json!({ "error": "not_found" }))
}
