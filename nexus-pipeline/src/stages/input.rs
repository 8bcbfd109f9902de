//! Input validation stage.

use super::{Stage, StageResult};
use crate::errors::StageError;
use crate::value::{Mapping, Value};
use tracing::debug;

/// Stage name used in errors and wrapper fields.
const STAGE_NAME: &str = "input";

/// Validates incoming data and wraps it for downstream stages.
///
/// Null data, empty text, empty sequences, and empty mappings are rejected
/// with `Invalid data`. Valid data is wrapped in a mapping:
/// `{"input": original, "validation": true, "stage": "input"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputStage;

impl InputStage {
    /// Creates a new input stage.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate(data: &Value) -> bool {
        match data {
            Value::Null => {
                debug!("validation failed: data is null");
                false
            }
            Value::Text(s) if s.trim().is_empty() => {
                debug!("validation failed: text is empty");
                false
            }
            Value::Sequence(items) if items.is_empty() => {
                debug!("validation failed: sequence is empty");
                false
            }
            Value::Mapping(entries) if entries.is_empty() => {
                debug!("validation failed: mapping is empty");
                false
            }
            _ => true,
        }
    }
}

impl Stage for InputStage {
    fn name(&self) -> &str {
        STAGE_NAME
    }

    fn transform(&self, input: &Value) -> StageResult {
        if !Self::validate(input) {
            return Err(StageError::new(STAGE_NAME, "Invalid data"));
        }

        let mut wrapped = Mapping::new();
        wrapped.insert("input".to_string(), input.clone());
        wrapped.insert("validation".to_string(), Value::Bool(true));
        wrapped.insert("stage".to_string(), Value::from(STAGE_NAME));
        Ok(Value::Mapping(wrapped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_wraps_valid_data() {
        let stage = InputStage::new();
        let input = Value::Int(42);
        let output = stage.transform(&input).unwrap();

        assert_eq!(output.get("input"), Some(&Value::Int(42)));
        assert_eq!(output.get("validation"), Some(&Value::Bool(true)));
        assert_eq!(output.get("stage"), Some(&Value::from("input")));
        // input is still usable by the caller
        assert_eq!(input, Value::Int(42));
    }

    #[test]
    fn test_rejects_null() {
        let err = InputStage::new().transform(&Value::Null).unwrap_err();
        assert_eq!(err, StageError::new("input", "Invalid data"));
    }

    #[test]
    fn test_rejects_empty_containers() {
        let stage = InputStage::new();
        for input in [
            Value::from(""),
            Value::from("   "),
            Value::Sequence(vec![]),
            Value::from(json!({})),
        ] {
            let err = stage.transform(&input).unwrap_err();
            assert_eq!(err.message, "Invalid data");
            assert_eq!(err.stage, "input");
        }
    }

    #[test]
    fn test_accepts_zero_and_false() {
        let stage = InputStage::new();
        assert!(stage.transform(&Value::Int(0)).is_ok());
        assert!(stage.transform(&Value::Bool(false)).is_ok());
        assert!(stage.transform(&Value::Float(0.0)).is_ok());
    }
}
