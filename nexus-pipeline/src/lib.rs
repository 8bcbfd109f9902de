//! # Nexus Pipeline
//!
//! A small, extensible staged data-transformation pipeline.
//!
//! Data flows through an ordered sequence of independently replaceable
//! stages and comes out as a human-readable summary or a structured error:
//!
//! - **Stages**: discrete units of work behind the [`stages::Stage`] trait;
//!   the built-in Input -> Transform -> Output sequence validates,
//!   enriches by runtime shape, and renders a summary
//! - **Pipelines**: sequential, fail-fast execution over one input
//! - **Adapters**: nominal pipeline specializations per data-source kind
//! - **Manager**: a registry dispatching requests by pipeline identifier
//!
//! Failures are values: a stage error stops its pipeline and is returned,
//! never thrown across a stage boundary.
//!
//! ## Quick Start
//!
//! ```
//! use nexus_pipeline::prelude::*;
//!
//! let mut manager = Manager::new();
//! manager.register(Adapter::json("JSON_001"));
//!
//! let result = manager.dispatch("JSON_001", &Value::Int(42)).unwrap();
//! assert_eq!(result, Value::from("Processed number: 42 (doubled: 84)"));
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod events;
pub mod manager;
pub mod pipeline;
pub mod processors;
pub mod stages;
pub mod streams;
pub mod testing;
pub mod value;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::{PipelineError, StageError};
    pub use crate::events::{
        CollectingTraceSink, LoggingTraceSink, NoOpTraceSink, TraceEvent, TraceSink,
    };
    pub use crate::manager::Manager;
    pub use crate::pipeline::{Adapter, AdapterKind, Pipeline};
    pub use crate::processors::{
        DataProcessor, LogProcessor, NumericProcessor, TextProcessor,
    };
    pub use crate::stages::{
        FnStage, InputStage, OutputStage, Stage, StageResult, TransformStage,
    };
    pub use crate::streams::{DataStream, EventStream, SensorStream, TransactionStream};
    pub use crate::value::{Mapping, Value};
}
