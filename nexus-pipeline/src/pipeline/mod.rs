//! Pipeline construction and sequential execution.

mod adapters;


pub use adapters::{Adapter, AdapterKind};

use crate::errors::PipelineError;
use crate::events::{NoOpTraceSink, TraceEvent, TraceSink};
use crate::stages::Stage;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// An ordered sequence of stages executed over one input.
///
/// Stages run in registration order, each stage's output feeding the next
/// stage's input. The first stage error stops execution immediately and
/// becomes the pipeline's result; later stages are never invoked.
pub struct Pipeline {
    id: String,
    label: String,
    stages: Vec<Box<dyn Stage>>,
    sink: Arc<dyn TraceSink>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("stages", &self.stages)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Creates an empty pipeline with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: "pipeline".to_string(),
            stages: Vec::new(),
            sink: Arc::new(NoOpTraceSink),
        }
    }

    /// Sets the trace label used when this pipeline processes data.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the trace sink events are emitted into.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the pipeline identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the trace label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the number of registered stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if no stages are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Appends a stage; it runs after all previously added stages.
    pub fn add_stage(&mut self, stage: impl Stage + 'static) {
        self.stages.push(Box::new(stage));
    }

    /// Runs the input through all stages sequentially, fail-fast.
    ///
    /// An empty pipeline is the identity function.
    pub fn execute(&self, data: &Value) -> Result<Value, PipelineError> {
        self.sink.emit(&TraceEvent::pipeline_started(&self.id));

        let mut current = data.clone();
        for stage in &self.stages {
            self.sink.emit(&TraceEvent::stage_started(&self.id, stage.name()));
            match stage.transform(&current) {
                Ok(output) => {
                    debug!(pipeline_id = %self.id, stage = stage.name(), "stage completed");
                    self.sink
                        .emit(&TraceEvent::stage_completed(&self.id, stage.name()));
                    current = output;
                }
                Err(err) => {
                    warn!(
                        pipeline_id = %self.id,
                        stage = %err.stage,
                        error = %err.message,
                        "stage failed, aborting pipeline"
                    );
                    self.sink
                        .emit(&TraceEvent::stage_failed(&self.id, &err.stage, &err.message));
                    self.sink
                        .emit(&TraceEvent::pipeline_failed(&self.id, &err.message));
                    return Err(err.into());
                }
            }
        }

        self.sink.emit(&TraceEvent::pipeline_completed(&self.id));
        Ok(current)
    }

    /// Processes data through the pipeline, tracing under its label.
    pub fn process(&self, data: &Value) -> Result<Value, PipelineError> {
        debug!(pipeline_id = %self.id, label = %self.label, "processing data through pipeline");
        self.execute(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StageError;
    use crate::events::CollectingTraceSink;
    use crate::stages::FnStage;
    use crate::testing::{FailingStage, RecordingStage};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = Pipeline::new("EMPTY_001");
        let input = Value::from("untouched");
        assert_eq!(pipeline.execute(&input).unwrap(), input);
    }

    #[test]
    fn test_stages_run_in_registration_order() {
        let mut pipeline = Pipeline::new("ORDER_001");
        pipeline.add_stage(FnStage::new("push_a", |v| {
            Ok(Value::Text(format!("{v}a")))
        }));
        pipeline.add_stage(FnStage::new("push_b", |v| {
            Ok(Value::Text(format!("{v}b")))
        }));

        assert_eq!(pipeline.stage_count(), 2);
        assert_eq!(
            pipeline.execute(&Value::from("x")).unwrap(),
            Value::from("xab")
        );
    }

    #[test]
    fn test_error_stops_execution() {
        let after_failure = RecordingStage::new("after");
        let calls = after_failure.call_handle();

        let mut pipeline = Pipeline::new("FAIL_001");
        pipeline.add_stage(FailingStage::new("boom", "deliberate failure"));
        pipeline.add_stage(after_failure);

        let err = pipeline.execute(&Value::Int(1)).unwrap_err();
        assert_eq!(
            err,
            PipelineError::Stage(StageError::new("boom", "deliberate failure"))
        );
        assert_eq!(*calls.lock(), 0);
    }

    #[test]
    fn test_trace_events_for_failed_run() {
        let sink = Arc::new(CollectingTraceSink::new());
        let mut pipeline = Pipeline::new("TRACE_001").with_sink(sink.clone());
        pipeline.add_stage(FailingStage::new("boom", "nope"));

        let _ = pipeline.execute(&Value::Int(1));
        assert_eq!(
            sink.event_types(),
            vec![
                "pipeline.started".to_string(),
                "stage.started".to_string(),
                "stage.failed".to_string(),
                "pipeline.failed".to_string(),
            ]
        );
    }

    #[test]
    fn test_input_reusable_after_execution() {
        let mut pipeline = Pipeline::new("REUSE_001");
        pipeline.add_stage(FnStage::new("drop", |_| Ok(Value::Null)));

        let input = Value::from("keep me");
        let _ = pipeline.execute(&input);
        assert_eq!(input, Value::from("keep me"));
    }
}
