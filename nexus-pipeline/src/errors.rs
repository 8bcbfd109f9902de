//! Error types for pipeline execution.
//!
//! Failures are values, never panics or unwound exceptions. A stage failure
//! is returned to the pipeline, which stops and hands it to the caller for
//! inspection or display.

use crate::value::{Mapping, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failure local to a single stage.
///
/// Always carries the originating stage name alongside the message. The
/// `Display` form is the bare message (e.g. `Invalid data`); callers that
/// want the structured form use [`StageError::to_value`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct StageError {
    /// Name of the stage that produced the failure.
    pub stage: String,
    /// Human-readable failure description.
    pub message: String,
}

impl StageError {
    /// Creates a new stage error.
    #[must_use]
    pub fn new(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Renders the error as a mapping value: `{"error": ..., "stage": ...}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut entries = Mapping::new();
        entries.insert("error".to_string(), Value::Text(self.message.clone()));
        entries.insert("stage".to_string(), Value::Text(self.stage.clone()));
        Value::Mapping(entries)
    }
}

/// The error type returned by pipeline and registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PipelineError {
    /// A stage aborted execution; the pipeline stopped at that stage.
    #[error("{0}")]
    Stage(#[from] StageError),

    /// No registered pipeline matched the requested identifier.
    #[error("Pipeline {pipeline_id} not found")]
    NotFound {
        /// The identifier that failed to resolve.
        pipeline_id: String,
    },

    /// An unexpected condition outside any stage's own failure path.
    #[error("Pipeline execution failed: {0}")]
    Execution(String),
}

impl PipelineError {
    /// Creates a not-found error for the given pipeline identifier.
    #[must_use]
    pub fn not_found(pipeline_id: impl Into<String>) -> Self {
        Self::NotFound {
            pipeline_id: pipeline_id.into(),
        }
    }

    /// Returns the underlying stage error, if this is one.
    #[must_use]
    pub const fn as_stage(&self) -> Option<&StageError> {
        match self {
            Self::Stage(err) => Some(err),
            Self::NotFound { .. } | Self::Execution(_) => None,
        }
    }
}
