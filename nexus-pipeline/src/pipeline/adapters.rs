//! Nominal pipeline specializations per data-source kind.
//!
//! Adapters differ only in identifier and trace label; every adapter wires
//! the same Input -> Transform -> Output stage sequence and processes data
//! identically. Tests hold this equivalence as a design property.

use super::Pipeline;
use crate::errors::PipelineError;
use crate::events::TraceSink;
use crate::stages::{InputStage, OutputStage, TransformStage};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The data-source kind an adapter is named after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    /// JSON documents.
    Json,
    /// CSV rows.
    Csv,
    /// Streaming readings.
    Stream,
}

impl AdapterKind {
    /// Returns the trace label for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Stream => "stream",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A pipeline pre-wired with the standard three-stage sequence.
#[derive(Debug)]
pub struct Adapter {
    kind: AdapterKind,
    pipeline: Pipeline,
}

impl Adapter {
    /// Creates an adapter of the given kind and identifier.
    #[must_use]
    pub fn new(kind: AdapterKind, id: impl Into<String>) -> Self {
        let mut pipeline = Pipeline::new(id).with_label(kind.label());
        pipeline.add_stage(InputStage::new());
        pipeline.add_stage(TransformStage::new());
        pipeline.add_stage(OutputStage::new());
        Self { kind, pipeline }
    }

    /// Creates a JSON adapter.
    #[must_use]
    pub fn json(id: impl Into<String>) -> Self {
        Self::new(AdapterKind::Json, id)
    }

    /// Creates a CSV adapter.
    #[must_use]
    pub fn csv(id: impl Into<String>) -> Self {
        Self::new(AdapterKind::Csv, id)
    }

    /// Creates a stream adapter.
    #[must_use]
    pub fn stream(id: impl Into<String>) -> Self {
        Self::new(AdapterKind::Stream, id)
    }

    /// Sets the trace sink on the underlying pipeline.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.pipeline = self.pipeline.with_sink(sink);
        self
    }

    /// Returns the adapter kind.
    #[must_use]
    pub const fn kind(&self) -> AdapterKind {
        self.kind
    }

    /// Returns the pipeline identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.pipeline.id()
    }

    /// Returns the underlying pipeline.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Processes data through the adapter's pipeline.
    pub fn process(&self, data: &Value) -> Result<Value, PipelineError> {
        debug!(kind = %self.kind, pipeline_id = %self.id(), "processing data through adapter");
        self.pipeline.execute(data)
    }
}

impl From<Adapter> for Pipeline {
    fn from(adapter: Adapter) -> Self {
        adapter.pipeline
    }
}
