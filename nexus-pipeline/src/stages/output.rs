//! Summary rendering stage.

use super::{Stage, StageResult};
use crate::value::{Mapping, Value};
use tracing::debug;

const STAGE_NAME: &str = "output";

/// Renders the enrichment produced upstream into a human-readable summary.
///
/// Extracts the `"transformed"` sub-mapping (falling back to the raw value)
/// and formats it according to its `type` tag. Values without a recognized
/// tag render as `Output: {value}`; absent or empty extracted data renders
/// as `Error: No data to format`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputStage;

impl OutputStage {
    /// Creates a new output stage.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Stage for OutputStage {
    fn name(&self) -> &str {
        STAGE_NAME
    }

    fn transform(&self, input: &Value) -> StageResult {
        let extracted = extract(input);
        if extracted.is_empty() {
            debug!("nothing to format");
            return Ok(Value::from("Error: No data to format"));
        }
        Ok(Value::Text(format_summary(&extracted)))
    }
}

fn extract(data: &Value) -> Value {
    data.get("transformed")
        .map_or_else(|| data.clone(), Clone::clone)
}

fn format_summary(data: &Value) -> String {
    if let Value::Mapping(entries) = data {
        if let Some(tag) = entries.get("type").and_then(Value::as_text) {
            match tag {
                "string" => {
                    let length = field(entries, "length", Value::Int(0));
                    let original = field(entries, "original", Value::Text(String::new()));
                    return format!("Processed text: {length} characters, content: '{original}'");
                }
                "numeric" => {
                    let original = field(entries, "original", Value::Int(0));
                    let doubled = field(entries, "doubled", Value::Int(0));
                    return format!("Processed number: {original} (doubled: {doubled})");
                }
                "list" => {
                    let count = field(entries, "count", Value::Int(0));
                    let first = field(entries, "first", Value::Null);
                    let last = field(entries, "last", Value::Null);
                    return format!("Processed list: {count} items (first: {first}, last: {last})");
                }
                "dict" => {
                    let key_count = field(entries, "key_count", Value::Int(0));
                    let keys = joined_keys(entries.get("keys"));
                    return format!("Processed dict: {key_count} keys ({keys})");
                }
                _ => {}
            }
        }
    }
    format!("Output: {data}")
}

fn field(entries: &Mapping, key: &str, default: Value) -> Value {
    entries.get(key).cloned().unwrap_or(default)
}

fn joined_keys(keys: Option<&Value>) -> String {
    match keys {
        Some(Value::Sequence(items)) => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::TransformStage;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(input: &Value) -> String {
        let enriched = TransformStage::new().transform(input).unwrap();
        match OutputStage::new().transform(&enriched).unwrap() {
            Value::Text(s) => s,
            other => panic!("expected text summary, got {other:?}"),
        }
    }

    #[test]
    fn test_renders_text_summary() {
        assert_eq!(
            render(&Value::from("hello")),
            "Processed text: 5 characters, content: 'hello'"
        );
    }

    #[test]
    fn test_renders_numeric_summary() {
        assert_eq!(render(&Value::Int(42)), "Processed number: 42 (doubled: 84)");
    }

    #[test]
    fn test_renders_list_summary() {
        assert_eq!(
            render(&Value::from(json!([22.1, 23.5, 21.8, 24.0, 22.9]))),
            "Processed list: 5 items (first: 22.1, last: 22.9)"
        );
    }

    #[test]
    fn test_renders_empty_list_with_null_ends() {
        let enriched = TransformStage::new()
            .transform(&Value::Sequence(vec![]))
            .unwrap();
        let out = OutputStage::new().transform(&enriched).unwrap();
        assert_eq!(
            out,
            Value::from("Processed list: 0 items (first: null, last: null)")
        );
    }

    #[test]
    fn test_renders_dict_summary_in_key_order() {
        assert_eq!(
            render(&Value::from(json!({"sensor": "temp", "value": 23.5, "unit": "C"}))),
            "Processed dict: 3 keys (sensor, value, unit)"
        );
    }

    #[test]
    fn test_empty_dict_renders_empty_key_list() {
        let enriched = TransformStage::new().transform(&Value::from(json!({}))).unwrap();
        let out = OutputStage::new().transform(&enriched).unwrap();
        assert_eq!(out, Value::from("Processed dict: 0 keys ()"));
    }

    #[test]
    fn test_untagged_value_uses_fallback() {
        let out = OutputStage::new().transform(&Value::Bool(true)).unwrap();
        assert_eq!(out, Value::from("Output: true"));
    }

    #[test]
    fn test_mapping_without_transformed_is_used_as_is() {
        // A mapping that skipped the transform stage renders via the fallback
        let data = Value::from(json!({"raw": 1}));
        let out = OutputStage::new().transform(&data).unwrap();
        assert_eq!(out, Value::from("Output: {raw: 1}"));
    }

    #[test]
    fn test_null_input_yields_no_data_message() {
        let out = OutputStage::new().transform(&Value::Null).unwrap();
        assert_eq!(out, Value::from("Error: No data to format"));
    }

    #[test]
    fn test_empty_extracted_mapping_yields_no_data_message() {
        let data = Value::from(json!({"transformed": {}}));
        let out = OutputStage::new().transform(&data).unwrap();
        assert_eq!(out, Value::from("Error: No data to format"));
    }
}
