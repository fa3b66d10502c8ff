//! The external model collaborator's contract (`spec.md` §6).
//!
//! This crate never implements a real model; [`crate::adapters::dummy::DummyAdapter`]
//! is the only concrete [`Adapter`] it ships, used by the scenario tests in
//! `spec.md` §8 and as a template for a real integration.

use std::collections::BTreeMap;

use axum::Router;
use serde_json::Value;

use crate::error::RequestError;
use crate::work_item::ShapeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    Generation,
    Metric,
}

/// A single declared field of the adapter's keyword-argument schema,
/// replacing the source's runtime `inspect.signature` reflection
/// (`spec.md` §9, "Dynamic validator construction").
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub schema: Value,
    pub required: bool,
    pub default: Option<Value>,
    /// Whether this field must be identical across every item of a batch
    /// (folded into the item's [`ShapeKey`]).
    pub shape_sensitive: bool,
}

/// An adapter's declared request shape, compiled into a JSON-schema
/// validator once at startup.
#[derive(Debug, Clone)]
pub struct RequestSchema {
    pub kind: AdapterKind,
    pub fields: Vec<FieldSpec>,
}

impl RequestSchema {
    /// Builds the full JSON-schema document (including the mandatory
    /// `batch` field) served at `GET /schema`.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = vec!["batch".to_string()];

        let batch_items_schema = match self.kind {
            AdapterKind::Generation => serde_json::json!({"type": "string"}),
            AdapterKind::Metric => serde_json::json!({
                "type": "array",
                "items": {"type": "string"},
                "minItems": 2,
                "maxItems": 2,
            }),
        };
        properties.insert(
            "batch".to_string(),
            serde_json::json!({"type": "array", "items": batch_items_schema}),
        );

        for field in &self.fields {
            properties.insert(field.name.to_string(), field.schema.clone());
            if field.required {
                required.push(field.name.to_string());
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": Value::Object(properties),
            "required": required,
        })
    }

    /// Validates a raw request body, returning the per-item [`ShapeKey`]
    /// (the shape-sensitive fields canonicalized) alongside the validated
    /// body on success.
    pub fn validate(&self, body: &Value) -> Result<ShapeKey, RequestError> {
        let schema = self.to_json_schema();
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| RequestError::Application(format!("invalid adapter schema: {e}")))?;

        let errors: Vec<Value> = validator
            .iter_errors(body)
            .map(|e| {
                serde_json::json!({
                    "loc": e.instance_path.to_string(),
                    "msg": e.to_string(),
                })
            })
            .collect();
        if !errors.is_empty() {
            return Err(RequestError::Validation(errors));
        }

        let mut shape = BTreeMap::new();
        if let Value::Object(obj) = body {
            for field in &self.fields {
                if field.shape_sensitive {
                    if let Some(value) = obj.get(field.name) {
                        shape.insert(field.name.to_string(), value.clone());
                    } else if let Some(default) = &field.default {
                        shape.insert(field.name.to_string(), default.clone());
                    }
                }
            }
        }
        Ok(ShapeKey::new(shape))
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreferredSettings {
    pub threads: Option<u32>,
    pub batch_size: Option<u32>,
    pub cache_size: Option<u32>,
}

/// One generation result, matching the source adapter's per-item payload
/// (`spec.md` §6).
#[derive(Debug, Clone, serde::Serialize)]
pub struct GenerationOutput {
    pub generated: String,
    pub size: GenerationSize,
    pub stopping_reason: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct GenerationSize {
    pub input: u32,
    pub output: u32,
    pub overflow: u32,
}

/// The external model's callable contract. Implementors are expected to be
/// cheap to clone (an `Arc` around shared model state) since one instance is
/// shared by every worker.
#[async_trait::async_trait]
pub trait Adapter: Send + Sync + 'static {
    fn kind(&self) -> AdapterKind;

    fn schema(&self) -> RequestSchema;

    /// Invokes the model on a shape-uniform batch of validated request
    /// bodies, returning one output per input, aligned by index
    /// (`spec.md` §4.1 step 5).
    async fn call(&self, batch: Vec<Value>) -> Result<Vec<Value>, RequestError>;

    /// Extra key-value pairs merged into every response's `meta` (`spec.md` §6).
    fn meta(&self) -> serde_json::Map<String, Value> {
        serde_json::Map::new()
    }

    /// Lets the adapter install auxiliary routes, e.g. `/tokenizer/count`
    /// (`spec.md` §6).
    fn router_hook(&self, router: Router<crate::http::AppState>) -> Router<crate::http::AppState> {
        router
    }

    fn preferred_settings(&self) -> PreferredSettings {
        PreferredSettings::default()
    }
}
