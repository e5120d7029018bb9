//! Typed view over a resolved JSON Schema node.
//!
//! The raw spec keeps schemas as `serde_json::Value`; the generator dispatches
//! on this tagged union instead so the match over schema kinds is exhaustive
//! and a missing arm is a compile error, not a silent fallback.

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;

/// One JSON-Schema-like type descriptor, parsed from a resolved `Value`.
///
/// `example`, `nullable` and `enum` apply to every kind and are consulted by
/// the generator before the kind itself.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub example: Option<Value>,
    pub default: Option<Value>,
    pub nullable: bool,
    pub enum_values: Vec<Value>,
    pub kind: SchemaKind,
}

/// The type/composition variant of a schema node.
#[derive(Debug, Clone, Default)]
pub enum SchemaKind {
    String(StringSchema),
    Number(NumberSchema),
    Integer(NumberSchema),
    Boolean,
    Null,
    Array(ArraySchema),
    Object(ObjectSchema),
    /// Sub-schemas kept as raw values; each is generated independently.
    AllOf(Vec<Value>),
    OneOf(Vec<Value>),
    AnyOf(Vec<Value>),
    /// Unrecognized or absent `type`. Generation falls back to a generic token.
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ArraySchema {
    /// Item schema kept raw so nested `$ref` back-edges survive for lazy resolution.
    pub items: Option<Value>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    /// Declared properties in spec order.
    pub properties: IndexMap<String, Value>,
    pub required: HashSet<String>,
}

impl Schema {
    /// Parse a resolved schema value into the tagged union.
    ///
    /// Never fails: malformed nodes land in [`SchemaKind::Unknown`] so mock
    /// data generation degrades instead of erroring.
    #[must_use]
    pub fn from_value(value: &Value) -> Schema {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => return Schema::default(),
        };

        let mut nullable = obj
            .get("nullable")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        // OpenAPI 3.1 expresses nullability as `type: ["string", "null"]`.
        let type_name = match obj.get("type") {
            Some(Value::String(t)) => Some(t.as_str()),
            Some(Value::Array(types)) => {
                nullable |= types.iter().any(|t| t == "null");
                types
                    .iter()
                    .filter_map(Value::as_str)
                    .find(|t| *t != "null")
            }
            _ => None,
        };

        let enum_values = obj
            .get("enum")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let kind = if let Some(subs) = composition_list(obj, "allOf") {
            SchemaKind::AllOf(subs)
        } else if let Some(subs) = composition_list(obj, "oneOf") {
            SchemaKind::OneOf(subs)
        } else if let Some(subs) = composition_list(obj, "anyOf") {
            SchemaKind::AnyOf(subs)
        } else {
            match type_name {
                Some("string") => SchemaKind::String(StringSchema {
                    format: str_field(obj, "format"),
                    pattern: str_field(obj, "pattern"),
                    min_length: usize_field(obj, "minLength"),
                    max_length: usize_field(obj, "maxLength"),
                }),
                Some("number") => SchemaKind::Number(number_bounds(obj)),
                Some("integer") => SchemaKind::Integer(number_bounds(obj)),
                Some("boolean") => SchemaKind::Boolean,
                Some("null") => SchemaKind::Null,
                Some("array") => SchemaKind::Array(array_schema(obj)),
                Some("object") => SchemaKind::Object(object_schema(obj)),
                // Untyped nodes with structural keywords still dispatch structurally.
                None if obj.contains_key("properties") => SchemaKind::Object(object_schema(obj)),
                None if obj.contains_key("items") => SchemaKind::Array(array_schema(obj)),
                _ => SchemaKind::Unknown,
            }
        };

        Schema {
            example: obj.get("example").cloned(),
            default: obj.get("default").cloned(),
            nullable,
            enum_values,
            kind,
        }
    }
}

fn composition_list(obj: &serde_json::Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    match obj.get(key) {
        Some(Value::Array(subs)) if !subs.is_empty() => Some(subs.clone()),
        _ => None,
    }
}

fn str_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn usize_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<usize> {
    obj.get(key).and_then(Value::as_u64).map(|n| n as usize)
}

fn number_bounds(obj: &serde_json::Map<String, Value>) -> NumberSchema {
    NumberSchema {
        minimum: obj.get("minimum").and_then(Value::as_f64),
        maximum: obj.get("maximum").and_then(Value::as_f64),
    }
}

fn array_schema(obj: &serde_json::Map<String, Value>) -> ArraySchema {
    ArraySchema {
        items: obj.get("items").cloned(),
        min_items: usize_field(obj, "minItems"),
        max_items: usize_field(obj, "maxItems"),
    }
}

fn object_schema(obj: &serde_json::Map<String, Value>) -> ObjectSchema {
    let properties = obj
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, schema)| (name.clone(), schema.clone()))
                .collect()
        })
        .unwrap_or_default();
    let required = obj
        .get("required")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    ObjectSchema {
        properties,
        required,
    }
}
