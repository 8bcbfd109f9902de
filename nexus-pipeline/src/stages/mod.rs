//! Stage trait and the three built-in stage implementations.
//!
//! Stages are the fundamental units of work in a pipeline: each one maps a
//! [`Value`] to a new [`Value`] or a stage-local error.

mod input;
mod output;
mod transform;

pub use input::InputStage;
pub use output::OutputStage;
pub use transform::TransformStage;

use crate::errors::StageError;
use crate::value::Value;
use std::fmt::Debug;

/// The outcome of one stage: a new value, or a failure tagged with the
/// originating stage.
pub type StageResult = Result<Value, StageError>;

/// Trait for pipeline stages.
///
/// A stage must not mutate its input; callers are free to reuse the
/// argument after the call. Side effects are limited to diagnostic tracing.
pub trait Stage: Send + Sync + Debug {
    /// Returns the name of the stage.
    fn name(&self) -> &str;

    /// Transforms the input into the stage's output.
    fn transform(&self, input: &Value) -> StageResult;
}

/// A simple function-based stage.
pub struct FnStage<F>
where
    F: Fn(&Value) -> StageResult + Send + Sync,
{
    name: String,
    func: F,
}

impl<F> FnStage<F>
where
    F: Fn(&Value) -> StageResult + Send + Sync,
{
    /// Creates a new function-based stage.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnStage<F>
where
    F: Fn(&Value) -> StageResult + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStage").field("name", &self.name).finish()
    }
}

impl<F> Stage for FnStage<F>
where
    F: Fn(&Value) -> StageResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, input: &Value) -> StageResult {
        (self.func)(input)
    }
}
