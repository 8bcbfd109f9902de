//! Registry dispatching requests to pipelines by identifier.

use crate::errors::PipelineError;
use crate::pipeline::Pipeline;
use crate::value::Value;
use tracing::{debug, warn};

/// Owns a collection of pipelines and routes requests to them.
///
/// Registration is append-only. Duplicate identifiers are permitted, but
/// lookups resolve to the first-registered match, so a duplicate is never
/// reachable.
#[derive(Debug, Default)]
pub struct Manager {
    pipelines: Vec<Pipeline>,
}

impl Manager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pipeline. Adapters convert implicitly.
    pub fn register(&mut self, pipeline: impl Into<Pipeline>) {
        let pipeline = pipeline.into();
        debug!(pipeline_id = %pipeline.id(), "pipeline registered");
        self.pipelines.push(pipeline);
    }

    /// Dispatches data to the first pipeline matching `pipeline_id`.
    pub fn dispatch(&self, pipeline_id: &str, data: &Value) -> Result<Value, PipelineError> {
        match self.pipelines.iter().find(|p| p.id() == pipeline_id) {
            Some(pipeline) => pipeline.process(data),
            None => {
                warn!(pipeline_id, "no pipeline registered under identifier");
                Err(PipelineError::not_found(pipeline_id))
            }
        }
    }

    /// Returns the number of registered pipelines, duplicates included.
    #[must_use]
    pub fn count(&self) -> usize {
        self.pipelines.len()
    }

    /// Returns true if no pipelines are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Adapter;
    use crate::stages::FnStage;
    use pretty_assertions::assert_eq;

    fn tagging_pipeline(id: &str, tag: &str) -> Pipeline {
        let mut pipeline = Pipeline::new(id);
        let tag = tag.to_string();
        pipeline.add_stage(FnStage::new("tag", move |_| Ok(Value::Text(tag.clone()))));
        pipeline
    }

    #[test]
    fn test_dispatch_to_registered_pipeline() {
        let mut manager = Manager::new();
        manager.register(Adapter::json("JSON_001"));
        manager.register(Adapter::csv("CSV_001"));

        let result = manager.dispatch("JSON_001", &Value::Int(42)).unwrap();
        assert_eq!(result, Value::from("Processed number: 42 (doubled: 84)"));
    }

    #[test]
    fn test_dispatch_unknown_id_is_not_found() {
        let manager = Manager::new();
        let err = manager.dispatch("UNKNOWN", &Value::Int(1)).unwrap_err();
        assert_eq!(err, PipelineError::not_found("UNKNOWN"));
        assert_eq!(format!("Error: {err}"), "Error: Pipeline UNKNOWN not found");
    }

    #[test]
    fn test_duplicate_id_resolves_to_first_registration() {
        let mut manager = Manager::new();
        manager.register(tagging_pipeline("DUP", "first"));
        manager.register(tagging_pipeline("DUP", "second"));

        assert_eq!(manager.count(), 2);
        assert_eq!(
            manager.dispatch("DUP", &Value::Null).unwrap(),
            Value::from("first")
        );
    }

    #[test]
    fn test_count_and_is_empty() {
        let mut manager = Manager::new();
        assert!(manager.is_empty());
        assert_eq!(manager.count(), 0);

        manager.register(Pipeline::new("A"));
        manager.register(Pipeline::new("B"));
        assert!(!manager.is_empty());
        assert_eq!(manager.count(), 2);
    }

    #[test]
    fn test_lookup_resolves_among_many() {
        let mut manager = Manager::new();
        manager.register(Adapter::json("JSON_001"));
        manager.register(Adapter::csv("CSV_001"));
        manager.register(Adapter::stream("STREAM_001"));

        let result = manager.dispatch("CSV_001", &Value::from("row")).unwrap();
        assert_eq!(
            result,
            Value::from("Processed text: 3 characters, content: 'row'")
        );
    }
}
