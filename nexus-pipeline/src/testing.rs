//! Mock stages for testing pipeline behavior.

use crate::errors::StageError;
use crate::stages::{Stage, StageResult};
use crate::value::Value;
use parking_lot::Mutex;
use std::sync::Arc;

/// A pass-through stage that records how often it was invoked.
///
/// Used to verify fail-fast semantics: a recording stage placed after a
/// failing stage must never be called.
#[derive(Debug)]
pub struct RecordingStage {
    name: String,
    calls: Arc<Mutex<usize>>,
}

impl RecordingStage {
    /// Creates a new recording stage.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns the number of times the stage was invoked.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }

    /// Returns a handle to the call counter that outlives the stage.
    #[must_use]
    pub fn call_handle(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.calls)
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        *self.calls.lock() = 0;
    }
}

impl Stage for RecordingStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, input: &Value) -> StageResult {
        *self.calls.lock() += 1;
        Ok(input.clone())
    }
}

/// A stage that always fails with a configured message.
#[derive(Debug, Clone)]
pub struct FailingStage {
    name: String,
    message: String,
}

impl FailingStage {
    /// Creates a new failing stage.
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl Stage for FailingStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, _input: &Value) -> StageResult {
        Err(StageError::new(self.name.clone(), self.message.clone()))
    }
}

/// A stage that ignores its input and returns a fixed value.
#[derive(Debug, Clone)]
pub struct ConstStage {
    name: String,
    output: Value,
}

impl ConstStage {
    /// Creates a new constant stage.
    #[must_use]
    pub fn new(name: impl Into<String>, output: Value) -> Self {
        Self {
            name: name.into(),
            output,
        }
    }
}

impl Stage for ConstStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, _input: &Value) -> StageResult {
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recording_stage_counts_calls() {
        let stage = RecordingStage::new("probe");
        assert_eq!(stage.call_count(), 0);

        let _ = stage.transform(&Value::Int(1));
        let _ = stage.transform(&Value::Int(2));
        assert_eq!(stage.call_count(), 2);

        stage.reset();
        assert_eq!(stage.call_count(), 0);
    }

    #[test]
    fn test_recording_stage_passes_through() {
        let stage = RecordingStage::new("probe");
        assert_eq!(stage.transform(&Value::from("x")), Ok(Value::from("x")));
    }

    #[test]
    fn test_failing_stage() {
        let stage = FailingStage::new("boom", "always fails");
        let err = stage.transform(&Value::Null).unwrap_err();
        assert_eq!(err, StageError::new("boom", "always fails"));
    }

    #[test]
    fn test_const_stage() {
        let stage = ConstStage::new("fixed", Value::Int(7));
        assert_eq!(stage.transform(&Value::Null), Ok(Value::Int(7)));
    }
}
