//! # Value Generator Module
//!
//! Produces one synthetic JSON value per resolved schema node, recursively
//! descending into object properties and array elements.
//!
//! ## Dispatch order
//!
//! First match wins: `example` verbatim, `nullable` coin flip, `enum` pick,
//! `allOf` merge, `oneOf`/`anyOf` pick, then the type itself. Unrecognized
//! types fall back to a generic token; mock data generation never errors.
//!
//! ## Randomness
//!
//! All randomness flows through a caller-supplied [`StdRng`], never a
//! process-wide source. Seeding that RNG makes the entire generation
//! deterministic, including UUIDs and timestamps, and concurrent requests
//! cannot interfere with each other's sequences.

mod context;
pub mod formats;
pub mod heuristics;

pub use context::{GenContext, MAX_DEPTH};

use crate::resolver::SchemaResolver;
use crate::schema::{ArraySchema, NumberSchema, ObjectSchema, Schema, SchemaKind, StringSchema};
use rand::rngs::StdRng;
use rand::Rng;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::warn;

/// Probability that a nullable schema generates `null`.
const NULL_PROBABILITY: f64 = 0.10;
/// Probability that a non-required object property is generated at all.
const OPTIONAL_PROPERTY_PROBABILITY: f64 = 0.80;
/// Default array length bounds when the schema declares none.
const DEFAULT_MIN_ITEMS: usize = 1;
const DEFAULT_MAX_ITEMS: usize = 5;
/// Hard cap on generated array length, whatever `maxItems` says.
const ARRAY_HARD_CAP: usize = 100;
/// Default numeric upper bound when the schema declares none.
const DEFAULT_MAX_NUMBER: f64 = 1000.0;
/// Default string length bounds for the generic word fallback.
const DEFAULT_MIN_LENGTH: usize = 1;
const DEFAULT_MAX_LENGTH: usize = 50;

/// Schema-driven synthetic value generator.
#[derive(Clone)]
pub struct Generator {
    resolver: Arc<SchemaResolver>,
}

impl Generator {
    #[must_use]
    pub fn new(resolver: Arc<SchemaResolver>) -> Self {
        Generator { resolver }
    }

    /// Generate one value obeying `schema`, within the given context.
    ///
    /// Infallible by design: malformed schemas and late resolution failures
    /// degrade to a generic token instead of crashing the request.
    pub fn generate(&self, schema: &Value, ctx: &GenContext, rng: &mut StdRng) -> Value {
        // Cycle back-edges are left as raw $ref nodes by the resolver; resolve
        // them lazily here, bounded by the depth budget below.
        let resolved;
        let schema = if schema.get("$ref").is_some() {
            match self.resolver.resolve(schema) {
                Ok(value) => {
                    resolved = value;
                    &resolved
                }
                Err(err) => {
                    warn!(
                        path = %ctx.path_display(),
                        error = %err,
                        "reference resolution failed during generation"
                    );
                    return Value::String(heuristics::word(rng));
                }
            }
        } else {
            schema
        };

        let parsed = Schema::from_value(schema);

        if let Some(example) = parsed.example {
            return example;
        }
        if parsed.nullable && rng.gen_bool(NULL_PROBABILITY) {
            return Value::Null;
        }
        if !parsed.enum_values.is_empty() {
            let idx = rng.gen_range(0..parsed.enum_values.len());
            return parsed.enum_values[idx].clone();
        }

        match parsed.kind {
            SchemaKind::AllOf(subs) => self.generate_all_of(&subs, ctx, rng),
            SchemaKind::OneOf(subs) | SchemaKind::AnyOf(subs) => {
                let idx = rng.gen_range(0..subs.len());
                self.generate(&subs[idx], ctx, rng)
            }
            SchemaKind::String(s) => Value::String(self.generate_string(&s, ctx, rng)),
            SchemaKind::Integer(n) => generate_integer(&n, rng),
            SchemaKind::Number(n) => generate_number(&n, rng),
            SchemaKind::Boolean => Value::Bool(rng.gen()),
            SchemaKind::Null => Value::Null,
            SchemaKind::Array(a) => self.generate_array(&a, ctx, rng),
            SchemaKind::Object(o) => self.generate_object(&o, ctx, rng),
            SchemaKind::Unknown => Value::String(heuristics::word(rng)),
        }
    }

    /// Generate every sub-schema and shallow-merge mapping results in list
    /// order, later keys overwriting earlier ones. When no sub-schema produced
    /// a mapping, the first result stands alone.
    fn generate_all_of(&self, subs: &[Value], ctx: &GenContext, rng: &mut StdRng) -> Value {
        let results: Vec<Value> = subs.iter().map(|s| self.generate(s, ctx, rng)).collect();
        let mut merged = Map::new();
        for result in &results {
            if let Value::Object(map) = result {
                for (key, value) in map {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        if merged.is_empty() {
            results.into_iter().next().unwrap_or(Value::Null)
        } else {
            Value::Object(merged)
        }
    }

    fn generate_string(&self, s: &StringSchema, ctx: &GenContext, rng: &mut StdRng) -> String {
        if let Some(format) = s.format.as_deref() {
            if let Some(value) = formats::for_format(format, rng) {
                return value;
            }
        }
        let hi = s.max_length.unwrap_or(DEFAULT_MAX_LENGTH).max(1);
        let lo = s.min_length.unwrap_or(DEFAULT_MIN_LENGTH).min(hi);
        // `pattern` is deliberately not honored: regex-directed generation is
        // out of scope and a generic word stands in for it, length bounds
        // still applying.
        if s.pattern.is_some() {
            return fit_length(heuristics::word(rng), lo, hi, rng);
        }
        if let Some(name) = ctx.property_name.as_deref() {
            if let Some(value) = heuristics::lookup(name, rng) {
                return fit_length(value, lo, hi, rng);
            }
        }
        fit_length(heuristics::word(rng), lo, hi, rng)
    }

    fn generate_array(&self, a: &ArraySchema, ctx: &GenContext, rng: &mut StdRng) -> Value {
        let items = match a.items.as_ref() {
            Some(items) => items,
            None => return Value::Array(Vec::new()),
        };
        let lo = a.min_items.unwrap_or(DEFAULT_MIN_ITEMS);
        let hi = a
            .max_items
            .unwrap_or(DEFAULT_MAX_ITEMS)
            .min(ARRAY_HARD_CAP)
            .max(lo);
        let count = rng.gen_range(lo..=hi);
        let values = (0..count)
            .map(|idx| self.generate(items, &ctx.element(idx), rng))
            .collect();
        Value::Array(values)
    }

    fn generate_object(&self, o: &ObjectSchema, ctx: &GenContext, rng: &mut StdRng) -> Value {
        if ctx.depth > MAX_DEPTH {
            // Depth budget exhausted (cyclic or pathologically deep schema):
            // stop recursing and stand in with a bare identifier.
            let mut stub = Map::new();
            stub.insert("id".to_string(), Value::String(formats::uuid(rng)));
            return Value::Object(stub);
        }
        let mut out = Map::new();
        for (name, prop_schema) in &o.properties {
            if o.required.contains(name) || rng.gen_bool(OPTIONAL_PROPERTY_PROBABILITY) {
                out.insert(
                    name.clone(),
                    self.generate(prop_schema, &ctx.property(name), rng),
                );
            }
        }
        Value::Object(out)
    }
}

fn generate_integer(n: &NumberSchema, rng: &mut StdRng) -> Value {
    let lo = n.minimum.unwrap_or(0.0).ceil() as i64;
    let hi = (n.maximum.unwrap_or(DEFAULT_MAX_NUMBER).floor() as i64).max(lo);
    Value::from(rng.gen_range(lo..=hi))
}

fn generate_number(n: &NumberSchema, rng: &mut StdRng) -> Value {
    let lo = n.minimum.unwrap_or(0.0);
    let hi = n.maximum.unwrap_or(DEFAULT_MAX_NUMBER).max(lo);
    let raw = if lo >= hi { lo } else { rng.gen_range(lo..=hi) };
    // two decimal digits, clamped back in case rounding crossed a bound
    let rounded = ((raw * 100.0).round() / 100.0).clamp(lo, hi);
    serde_json::Number::from_f64(rounded)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

/// Pad with generic words / truncate so the result lands in `[lo, hi]`.
fn fit_length(mut value: String, lo: usize, hi: usize, rng: &mut StdRng) -> String {
    while value.len() < lo {
        value.push_str(&heuristics::word(rng));
    }
    if value.len() > hi {
        value.truncate(hi);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use serde_json::json;

    fn generator() -> Generator {
        Generator::new(Arc::new(SchemaResolver::new(Arc::new(json!({})))))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1234)
    }

    #[test]
    fn test_example_returned_verbatim() {
        let gen = generator();
        let schema = json!({"type": "integer", "minimum": 0, "maximum": 1, "example": 999});
        for _ in 0..10 {
            assert_eq!(
                gen.generate(&schema, &GenContext::root(), &mut rng()),
                json!(999)
            );
        }
    }

    #[test]
    fn test_enum_membership() {
        let gen = generator();
        let schema = json!({"type": "string", "enum": ["a", "b", "c"]});
        let mut rng = rng();
        for _ in 0..50 {
            let value = gen.generate(&schema, &GenContext::root(), &mut rng);
            assert!(["a", "b", "c"].contains(&value.as_str().unwrap()));
        }
    }

    #[test]
    fn test_integer_bounds_and_wholeness() {
        let gen = generator();
        let schema = json!({"type": "integer", "minimum": 5, "maximum": 9});
        let mut rng = rng();
        for _ in 0..100 {
            let value = gen.generate(&schema, &GenContext::root(), &mut rng);
            let n = value.as_i64().expect("integer must be whole");
            assert!((5..=9).contains(&n));
        }
    }

    #[test]
    fn test_number_bounds() {
        let gen = generator();
        let schema = json!({"type": "number", "minimum": 1.5, "maximum": 2.5});
        let mut rng = rng();
        for _ in 0..100 {
            let n = gen
                .generate(&schema, &GenContext::root(), &mut rng)
                .as_f64()
                .unwrap();
            assert!((1.5..=2.5).contains(&n), "out of bounds: {n}");
        }
    }

    #[test]
    fn test_string_length_bounds() {
        let gen = generator();
        let schema = json!({"type": "string", "minLength": 12, "maxLength": 14});
        let mut rng = rng();
        for _ in 0..50 {
            let s = gen.generate(&schema, &GenContext::root(), &mut rng);
            let len = s.as_str().unwrap().len();
            assert!((12..=14).contains(&len), "bad length {len}");
        }
    }

    #[test]
    fn test_pattern_fallback_respects_length_bounds() {
        let gen = generator();
        let schema = json!({
            "type": "string", "pattern": "^[A-Z]{3}$",
            "minLength": 10, "maxLength": 12
        });
        let mut rng = rng();
        for _ in 0..50 {
            let s = gen.generate(&schema, &GenContext::root(), &mut rng);
            let len = s.as_str().unwrap().len();
            assert!((10..=12).contains(&len), "bad length {len}");
        }
    }

    #[test]
    fn test_array_length_bounds() {
        let gen = generator();
        let schema = json!({
            "type": "array", "minItems": 2, "maxItems": 4,
            "items": {"type": "boolean"}
        });
        let mut rng = rng();
        for _ in 0..50 {
            let arr = gen.generate(&schema, &GenContext::root(), &mut rng);
            let len = arr.as_array().unwrap().len();
            assert!((2..=4).contains(&len));
        }
    }

    #[test]
    fn test_array_without_items_is_empty() {
        let gen = generator();
        let schema = json!({"type": "array", "minItems": 3});
        let arr = gen.generate(&schema, &GenContext::root(), &mut rng());
        assert_eq!(arr, json!([]));
    }

    #[test]
    fn test_required_property_always_present() {
        let gen = generator();
        let schema = json!({
            "type": "object",
            "properties": {
                "id": {"type": "string", "format": "uuid"},
                "role": {"type": "string", "enum": ["admin", "user", "guest"]}
            },
            "required": ["id"]
        });
        let mut rng = rng();
        let mut role_count = 0;
        for _ in 0..200 {
            let obj = gen.generate(&schema, &GenContext::root(), &mut rng);
            let obj = obj.as_object().unwrap();
            let id = obj["id"].as_str().unwrap();
            assert_eq!(id.len(), 36);
            assert_eq!(id.as_bytes()[14], b'4');
            if let Some(role) = obj.get("role") {
                role_count += 1;
                assert!(["admin", "user", "guest"].contains(&role.as_str().unwrap()));
            }
        }
        // optional property appears roughly 80% of the time
        assert!((120..=195).contains(&role_count), "role seen {role_count}x");
    }

    #[test]
    fn test_all_of_merge_later_wins() {
        let gen = generator();
        let schema = json!({"allOf": [
            {"type": "object", "properties": {"a": {"example": 1}, "x": {"example": "first"}},
             "required": ["a", "x"]},
            {"type": "object", "properties": {"b": {"example": 2}, "x": {"example": "second"}},
             "required": ["b", "x"]}
        ]});
        let obj = gen.generate(&schema, &GenContext::root(), &mut rng());
        assert_eq!(obj["a"], json!(1));
        assert_eq!(obj["b"], json!(2));
        assert_eq!(obj["x"], json!("second"));
    }

    #[test]
    fn test_all_of_non_object_falls_back_to_first() {
        let gen = generator();
        let schema = json!({"allOf": [
            {"type": "integer", "example": 7},
            {"type": "integer", "example": 8}
        ]});
        assert_eq!(
            gen.generate(&schema, &GenContext::root(), &mut rng()),
            json!(7)
        );
    }

    #[test]
    fn test_one_of_picks_a_branch() {
        let gen = generator();
        let schema = json!({"oneOf": [
            {"type": "string", "example": "left"},
            {"type": "string", "example": "right"}
        ]});
        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let v = gen.generate(&schema, &GenContext::root(), &mut rng);
            seen.insert(v.as_str().unwrap().to_string());
        }
        assert_eq!(seen.len(), 2, "both branches should appear: {seen:?}");
    }

    #[test]
    fn test_nullable_flips_null_sometimes() {
        let gen = generator();
        let schema = json!({"type": "boolean", "nullable": true});
        let mut rng = rng();
        let nulls = (0..500)
            .filter(|_| gen.generate(&schema, &GenContext::root(), &mut rng).is_null())
            .count();
        assert!((10..=120).contains(&nulls), "null rate off: {nulls}/500");
    }

    #[test]
    fn test_cyclic_schema_terminates() {
        let doc = json!({
            "components": {"schemas": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "value": {"type": "integer"},
                        "next": {"$ref": "#/components/schemas/Node"}
                    },
                    "required": ["value", "next"]
                }
            }}
        });
        let resolver = Arc::new(SchemaResolver::new(Arc::new(doc)));
        let gen = Generator::new(resolver.clone());
        let schema = resolver
            .resolve(&json!({"$ref": "#/components/schemas/Node"}))
            .unwrap();
        let value = gen.generate(&schema, &GenContext::root(), &mut rng());
        assert!(value.is_object());
        // walking the chain bottoms out at the depth stub
        let mut depth = 0;
        let mut cur = &value;
        while let Some(next) = cur.get("next") {
            depth += 1;
            assert!(depth <= MAX_DEPTH + 1, "generation recursed past the budget");
            cur = next;
        }
    }

    #[test]
    fn test_unknown_type_yields_token() {
        let gen = generator();
        let value = gen.generate(&json!({"type": "gizmo"}), &GenContext::root(), &mut rng());
        assert!(value.is_string());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let gen = generator();
        let schema = json!({
            "type": "object",
            "properties": {
                "id": {"type": "string", "format": "uuid"},
                "name": {"type": "string"},
                "tags": {"type": "array", "items": {"type": "string"}}
            },
            "required": ["id", "name", "tags"]
        });
        let a = gen.generate(&schema, &GenContext::root(), &mut StdRng::seed_from_u64(5));
        let b = gen.generate(&schema, &GenContext::root(), &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
