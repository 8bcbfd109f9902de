//! Trace events and the injectable sink they flow into.
//!
//! The core never writes to stdout or stderr. Pipelines emit [`TraceEvent`]s
//! into a caller-configured [`TraceSink`]; the default sink discards them.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, Level};

/// A diagnostic event emitted during pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// The event type, e.g. `stage.completed`.
    pub event_type: String,
    /// The pipeline the event belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,
    /// The stage the event belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Extra detail, e.g. a failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl TraceEvent {
    /// Creates a new event with only a type.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            pipeline_id: None,
            stage: None,
            detail: None,
        }
    }

    /// Sets the pipeline identifier.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline_id: impl Into<String>) -> Self {
        self.pipeline_id = Some(pipeline_id.into());
        self
    }

    /// Sets the stage name.
    #[must_use]
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// Sets the detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// A pipeline run started.
    #[must_use]
    pub fn pipeline_started(pipeline_id: &str) -> Self {
        Self::new("pipeline.started").with_pipeline(pipeline_id)
    }

    /// A pipeline run finished with the final stage's output.
    #[must_use]
    pub fn pipeline_completed(pipeline_id: &str) -> Self {
        Self::new("pipeline.completed").with_pipeline(pipeline_id)
    }

    /// A pipeline run stopped at a failing stage.
    #[must_use]
    pub fn pipeline_failed(pipeline_id: &str, detail: &str) -> Self {
        Self::new("pipeline.failed")
            .with_pipeline(pipeline_id)
            .with_detail(detail)
    }

    /// A stage began executing.
    #[must_use]
    pub fn stage_started(pipeline_id: &str, stage: &str) -> Self {
        Self::new("stage.started")
            .with_pipeline(pipeline_id)
            .with_stage(stage)
    }

    /// A stage produced an output.
    #[must_use]
    pub fn stage_completed(pipeline_id: &str, stage: &str) -> Self {
        Self::new("stage.completed")
            .with_pipeline(pipeline_id)
            .with_stage(stage)
    }

    /// A stage returned an error.
    #[must_use]
    pub fn stage_failed(pipeline_id: &str, stage: &str, detail: &str) -> Self {
        Self::new("stage.failed")
            .with_pipeline(pipeline_id)
            .with_stage(stage)
            .with_detail(detail)
    }
}

/// Trait for sinks that receive trace events.
///
/// Implementations must never fail; tracing is best-effort by contract.
pub trait TraceSink: Send + Sync {
    /// Receives one event.
    fn emit(&self, event: &TraceEvent);
}

/// A sink that discards all events.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpTraceSink;

impl TraceSink for NoOpTraceSink {
    fn emit(&self, _event: &TraceEvent) {
        // Intentionally empty - discards all events
    }
}

/// A sink that forwards events to the `tracing` framework.
#[derive(Debug, Clone)]
pub struct LoggingTraceSink {
    level: Level,
}

impl Default for LoggingTraceSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingTraceSink {
    /// Creates a sink logging at the given level.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level sink.
    #[must_use]
    pub const fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    /// Creates an info-level sink.
    #[must_use]
    pub const fn info() -> Self {
        Self::new(Level::INFO)
    }
}

impl TraceSink for LoggingTraceSink {
    fn emit(&self, event: &TraceEvent) {
        match self.level {
            Level::DEBUG => debug!(
                event_type = %event.event_type,
                pipeline_id = ?event.pipeline_id,
                stage = ?event.stage,
                detail = ?event.detail,
                "Event: {}", event.event_type
            ),
            _ => info!(
                event_type = %event.event_type,
                pipeline_id = ?event.pipeline_id,
                stage = ?event.stage,
                detail = ?event.detail,
                "Event: {}", event.event_type
            ),
        }
    }
}

/// A sink that collects events in memory, for tests.
#[derive(Debug, Default)]
pub struct CollectingTraceSink {
    events: RwLock<Vec<TraceEvent>>,
}

impl CollectingTraceSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.read().clone()
    }

    /// Returns the event types in emission order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events
            .read()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl TraceSink for CollectingTraceSink {
    fn emit(&self, event: &TraceEvent) {
        self.events.write().push(event.clone());
    }
}
