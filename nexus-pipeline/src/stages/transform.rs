//! Shape-dispatched enrichment stage.

use super::{Stage, StageResult};
use crate::errors::StageError;
use crate::value::{Mapping, Value};
use tracing::debug;

const STAGE_NAME: &str = "transform";

/// Enriches data according to its runtime shape.
///
/// First unwraps the `"input"` field if the previous stage produced a
/// wrapper mapping, then classifies the extracted value and builds an
/// enrichment mapping tagged with a `type` field (see [`enrich`] arms).
/// The result is wrapped as
/// `{"input": original, "transformed": enrichment, "enriched": true,
/// "stage": "transform"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformStage;

impl TransformStage {
    /// Creates a new transform stage.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Stage for TransformStage {
    fn name(&self) -> &str {
        STAGE_NAME
    }

    fn transform(&self, input: &Value) -> StageResult {
        let extracted = extract(input);
        let transformed = enrich(&extracted)?;

        let mut result = Mapping::new();
        result.insert("input".to_string(), input.clone());
        result.insert("transformed".to_string(), transformed);
        result.insert("enriched".to_string(), Value::Bool(true));
        result.insert("stage".to_string(), Value::from(STAGE_NAME));
        Ok(Value::Mapping(result))
    }
}

/// Unwraps the inner value from an upstream wrapper mapping, if present.
fn extract(data: &Value) -> Value {
    data.get("input").map_or_else(|| data.clone(), Clone::clone)
}

fn enrich(data: &Value) -> Result<Value, StageError> {
    match data {
        Value::Text(s) => {
            debug!(text = %s, "transforming text");
            let length = i64::try_from(s.chars().count()).unwrap_or(i64::MAX);
            let mut out = Mapping::new();
            out.insert("original".to_string(), data.clone());
            out.insert("uppercase".to_string(), Value::Text(s.to_uppercase()));
            out.insert("length".to_string(), Value::Int(length));
            out.insert("type".to_string(), Value::from("string"));
            Ok(Value::Mapping(out))
        }
        Value::Int(n) => {
            debug!(value = n, "transforming integer");
            let doubled = n
                .checked_mul(2)
                .ok_or_else(|| StageError::new(STAGE_NAME, "numeric overflow"))?;
            let squared = n
                .checked_mul(*n)
                .ok_or_else(|| StageError::new(STAGE_NAME, "numeric overflow"))?;
            let mut out = Mapping::new();
            out.insert("original".to_string(), data.clone());
            out.insert("doubled".to_string(), Value::Int(doubled));
            out.insert("squared".to_string(), Value::Int(squared));
            out.insert("type".to_string(), Value::from("numeric"));
            Ok(Value::Mapping(out))
        }
        Value::Float(x) => {
            debug!(value = x, "transforming float");
            let mut out = Mapping::new();
            out.insert("original".to_string(), data.clone());
            out.insert("doubled".to_string(), Value::Float(x * 2.0));
            out.insert("squared".to_string(), Value::Float(x * x));
            out.insert("type".to_string(), Value::from("numeric"));
            Ok(Value::Mapping(out))
        }
        Value::Sequence(items) => {
            debug!(count = items.len(), "transforming sequence");
            let count = i64::try_from(items.len()).unwrap_or(i64::MAX);
            let mut out = Mapping::new();
            out.insert("original".to_string(), data.clone());
            out.insert("count".to_string(), Value::Int(count));
            out.insert(
                "first".to_string(),
                items.first().cloned().unwrap_or(Value::Null),
            );
            out.insert(
                "last".to_string(),
                items.last().cloned().unwrap_or(Value::Null),
            );
            out.insert("type".to_string(), Value::from("list"));
            Ok(Value::Mapping(out))
        }
        Value::Mapping(entries) => {
            debug!(keys = entries.len(), "transforming mapping");
            let keys: Vec<Value> = entries.keys().map(|k| Value::from(k.as_str())).collect();
            let key_count = i64::try_from(entries.len()).unwrap_or(i64::MAX);
            let mut out = Mapping::new();
            out.insert("original".to_string(), data.clone());
            out.insert("keys".to_string(), Value::Sequence(keys));
            out.insert("key_count".to_string(), Value::Int(key_count));
            out.insert("type".to_string(), Value::from("dict"));
            Ok(Value::Mapping(out))
        }
        Value::Null | Value::Bool(_) => {
            debug!(shape = data.type_name(), "unrecognized shape, passing through");
            Ok(data.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn transformed(input: &Value) -> Value {
        let output = TransformStage::new().transform(input).unwrap();
        output.get("transformed").cloned().unwrap()
    }

    #[test]
    fn test_unwraps_input_wrapper() {
        let wrapped = Value::from(json!({"input": "abc", "validation": true, "stage": "input"}));
        let out = transformed(&wrapped);
        assert_eq!(out.get("original"), Some(&Value::from("abc")));
        assert_eq!(out.get("type"), Some(&Value::from("string")));
    }

    #[test]
    fn test_mapping_without_input_key_is_used_as_is() {
        let data = Value::from(json!({"sensor": "temp", "value": 23.5, "unit": "C"}));
        let out = transformed(&data);
        assert_eq!(out.get("type"), Some(&Value::from("dict")));
        assert_eq!(out.get("key_count"), Some(&Value::Int(3)));
        assert_eq!(
            out.get("keys"),
            Some(&Value::Sequence(vec![
                Value::from("sensor"),
                Value::from("value"),
                Value::from("unit"),
            ]))
        );
    }

    #[test]
    fn test_text_enrichment() {
        let out = transformed(&Value::from("hello"));
        assert_eq!(out.get("original"), Some(&Value::from("hello")));
        assert_eq!(out.get("uppercase"), Some(&Value::from("HELLO")));
        assert_eq!(out.get("length"), Some(&Value::Int(5)));
        assert_eq!(out.get("type"), Some(&Value::from("string")));
    }

    #[test]
    fn test_integer_enrichment() {
        let out = transformed(&Value::Int(42));
        assert_eq!(out.get("doubled"), Some(&Value::Int(84)));
        assert_eq!(out.get("squared"), Some(&Value::Int(1764)));
        assert_eq!(out.get("type"), Some(&Value::from("numeric")));
    }

    #[test]
    fn test_float_enrichment() {
        let out = transformed(&Value::Float(23.5));
        assert_eq!(out.get("doubled"), Some(&Value::Float(47.0)));
        assert_eq!(out.get("type"), Some(&Value::from("numeric")));
    }

    #[test]
    fn test_integer_overflow_is_a_stage_error() {
        let err = TransformStage::new()
            .transform(&Value::Int(i64::MAX))
            .unwrap_err();
        assert_eq!(err.stage, "transform");
        assert_eq!(err.message, "numeric overflow");
    }

    #[test]
    fn test_sequence_enrichment() {
        let out = transformed(&Value::from(json!([22.1, 23.5, 21.8, 24.0, 22.9])));
        assert_eq!(out.get("count"), Some(&Value::Int(5)));
        assert_eq!(out.get("first"), Some(&Value::Float(22.1)));
        assert_eq!(out.get("last"), Some(&Value::Float(22.9)));
        assert_eq!(out.get("type"), Some(&Value::from("list")));
    }

    #[test]
    fn test_empty_sequence_has_null_first_and_last() {
        let out = transformed(&Value::Sequence(vec![]));
        assert_eq!(out.get("count"), Some(&Value::Int(0)));
        assert_eq!(out.get("first"), Some(&Value::Null));
        assert_eq!(out.get("last"), Some(&Value::Null));
    }

    #[test]
    fn test_empty_mapping_has_zero_keys() {
        let out = transformed(&Value::from(json!({})));
        assert_eq!(out.get("key_count"), Some(&Value::Int(0)));
        assert_eq!(out.get("keys"), Some(&Value::Sequence(vec![])));
    }

    #[test]
    fn test_bool_passes_through_untagged() {
        let out = transformed(&Value::Bool(true));
        assert_eq!(out, Value::Bool(true));
    }

    #[test]
    fn test_wrapper_shape() {
        let output = TransformStage::new().transform(&Value::Int(1)).unwrap();
        assert_eq!(output.get("input"), Some(&Value::Int(1)));
        assert_eq!(output.get("enriched"), Some(&Value::Bool(true)));
        assert_eq!(output.get("stage"), Some(&Value::from("transform")));
    }
}
