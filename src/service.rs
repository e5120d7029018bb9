//! Service facade: one loaded spec, one resolver, one store, and a handler
//! per declared operation.

use crate::config::MockConfig;
use crate::handler::MockHandler;
use crate::resolver::SchemaResolver;
use crate::spec::{load_spec, load_spec_from_value, OperationMeta, RouteInfo};
use crate::store::StateStore;
use http::Method;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A fully constructed mock service for one OpenAPI document. The mounting
/// transport looks up a [`MockHandler`] by method and matched path template
/// and feeds it requests.
pub struct MockService {
    handlers: Vec<Arc<MockHandler>>,
    store: Arc<StateStore>,
    config: Arc<MockConfig>,
}

impl MockService {
    /// Load a spec from a YAML or JSON file and build handlers for every
    /// operation it declares.
    pub fn from_file<P: AsRef<Path>>(path: P, config: MockConfig) -> anyhow::Result<Self> {
        let (doc, operations) = load_spec(path)?;
        Ok(Self::assemble(doc, operations, config))
    }

    /// Build a service from an already-parsed OpenAPI document.
    pub fn from_value(doc: Value, config: MockConfig) -> anyhow::Result<Self> {
        let (doc, operations) = load_spec_from_value(doc)?;
        Ok(Self::assemble(doc, operations, config))
    }

    fn assemble(doc: Arc<Value>, operations: Vec<OperationMeta>, config: MockConfig) -> Self {
        let resolver = Arc::new(SchemaResolver::new(doc));
        let store = Arc::new(StateStore::new());
        let config = Arc::new(config);
        let handlers = operations
            .into_iter()
            .map(|op| {
                Arc::new(MockHandler::new(
                    Arc::new(op),
                    Arc::clone(&resolver),
                    Arc::clone(&store),
                    Arc::clone(&config),
                ))
            })
            .collect::<Vec<_>>();
        info!(
            routes = handlers.len(),
            stateful = config.stateful,
            "mock service assembled"
        );
        MockService {
            handlers,
            store,
            config,
        }
    }

    pub fn route_count(&self) -> usize {
        self.handlers.len()
    }

    /// Registered routes in declaration order, for display and diagnostics.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.handlers
            .iter()
            .map(|h| h.operation().route_info())
            .collect()
    }

    /// The handler registered for a method and path template, if any.
    pub fn handler(&self, method: &Method, path_pattern: &str) -> Option<Arc<MockHandler>> {
        self.handlers
            .iter()
            .find(|h| {
                let op = h.operation();
                op.method == *method && op.path_pattern == path_pattern
            })
            .cloned()
    }

    /// The shared state store, exposed so embedders can pre-seed or reset
    /// collections between test scenarios.
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }
}
