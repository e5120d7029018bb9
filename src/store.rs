//! In-memory collection store backing stateful CRUD routes.
//!
//! Collections are keyed by path template with the parameter segments
//! stripped, so `/pets` and `/pets/{petId}` share one collection. All data
//! lives in process memory and is lost on drop.

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Value>>,
    seeded: HashSet<String>,
}

/// Thread-safe store of named JSON collections.
#[derive(Default)]
pub struct StateStore {
    inner: Mutex<Inner>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a collection has been seeded with generated items yet.
    /// Used by handlers to lazily populate a collection on first read.
    pub fn is_seeded(&self, collection: &str) -> bool {
        self.inner.lock().seeded.contains(collection)
    }

    /// Replace a collection's contents and mark it seeded.
    pub fn seed(&self, collection: &str, items: Vec<Value>) {
        let mut inner = self.inner.lock();
        debug!(collection = %collection, count = items.len(), "seeding collection");
        inner.collections.insert(collection.to_string(), items);
        inner.seeded.insert(collection.to_string());
    }

    /// All items in a collection, in insertion order.
    pub fn get_all(&self, collection: &str) -> Vec<Value> {
        self.inner
            .lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// The item whose `id` field equals `id`, compared as a string.
    pub fn get_by_id(&self, collection: &str, id: &str) -> Option<Value> {
        let inner = self.inner.lock();
        inner
            .collections
            .get(collection)?
            .iter()
            .find(|item| id_matches(item, id))
            .cloned()
    }

    /// Append a new item. Any client-supplied `id` is discarded in favor of
    /// a fresh UUID, and a `createdAt` timestamp is stamped on.
    pub fn create(&self, collection: &str, mut item: Value) -> Value {
        if !item.is_object() {
            item = json!({ "value": item });
        }
        let obj = item.as_object_mut().unwrap();
        obj.insert("id".into(), json!(uuid::Uuid::new_v4().to_string()));
        obj.insert("createdAt".into(), json!(chrono::Utc::now().to_rfc3339()));
        let mut inner = self.inner.lock();
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(item.clone());
        inner.seeded.insert(collection.to_string());
        item
    }

    /// Merge `patch`'s fields into the stored item; the stored `id` wins
    /// and an `updatedAt` timestamp is stamped. Returns the updated item,
    /// or `None` if no item has that id.
    pub fn update(&self, collection: &str, id: &str, patch: Value) -> Option<Value> {
        let mut inner = self.inner.lock();
        let items = inner.collections.get_mut(collection)?;
        let item = items.iter_mut().find(|item| id_matches(item, id))?;
        if let (Some(target), Some(fields)) = (item.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                if key != "id" {
                    target.insert(key.clone(), value.clone());
                }
            }
            target.insert("updatedAt".into(), json!(chrono::Utc::now().to_rfc3339()));
        }
        Some(item.clone())
    }

    /// Remove the item with the given id. Returns whether anything was removed.
    pub fn delete(&self, collection: &str, id: &str) -> bool {
        let mut inner = self.inner.lock();
        let items = match inner.collections.get_mut(collection) {
            Some(items) => items,
            None => return false,
        };
        let before = items.len();
        items.retain(|item| !id_matches(item, id));
        items.len() != before
    }

    /// Drop all collections and seed markers.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.collections.clear();
        inner.seeded.clear();
    }
}

/// Compare an item's `id` field to a path parameter, string-wise, so numeric
/// ids in specs match their path representation.
fn id_matches(item: &Value, id: &str) -> bool {
    match item.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}
