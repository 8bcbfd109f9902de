//! Standalone single-pass data processors.
//!
//! These are leaf utilities a host application calls directly; the pipeline
//! core never invokes them. Each one validates its input shape and renders
//! a one-line summary, returning a descriptive error string on bad input
//! rather than failing.

use crate::value::Value;
use tracing::debug;

/// Trait for the standalone processors.
pub trait DataProcessor {
    /// Returns true if the data has the shape this processor handles.
    fn validate(&self, data: &Value) -> bool;

    /// Computes the processor's summary, or a descriptive error string.
    fn process(&self, data: &Value) -> String;

    /// Wraps a summary for display.
    fn format_output(&self, result: &str) -> String {
        format!("Output: {result}")
    }
}

/// Summarizes a sequence of numbers: count, sum, and average.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericProcessor;

impl NumericProcessor {
    /// Creates a new numeric processor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DataProcessor for NumericProcessor {
    fn validate(&self, data: &Value) -> bool {
        match data {
            Value::Sequence(items) if !items.is_empty() => items
                .iter()
                .all(|item| matches!(item, Value::Int(_) | Value::Float(_))),
            _ => false,
        }
    }

    fn process(&self, data: &Value) -> String {
        debug!(shape = data.type_name(), "processing numeric data");
        if !self.validate(data) {
            return "Invalid numeric data".to_string();
        }
        let Value::Sequence(items) = data else {
            return "Invalid numeric data".to_string();
        };

        let values: Vec<f64> = items
            .iter()
            .map(|item| match item {
                Value::Int(n) => *n as f64,
                Value::Float(x) => *x,
                _ => 0.0,
            })
            .collect();
        let sum: f64 = values.iter().sum();
        let avg = sum / values.len() as f64;
        format!(
            "Processed {} numeric values, sum={sum}, avg={avg}",
            values.len()
        )
    }
}

/// Summarizes text: character and word counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextProcessor;

impl TextProcessor {
    /// Creates a new text processor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DataProcessor for TextProcessor {
    fn validate(&self, data: &Value) -> bool {
        matches!(data, Value::Text(s) if !s.is_empty())
    }

    fn process(&self, data: &Value) -> String {
        debug!(shape = data.type_name(), "processing text data");
        let Value::Text(s) = data else {
            return "Invalid text data".to_string();
        };
        if s.is_empty() {
            return "Invalid text data".to_string();
        }

        let characters = s.chars().count();
        let words = s.split_whitespace().count();
        format!("Processed text: {characters} characters, {words} words")
    }
}

/// Classifies a log line by its level prefix.
///
/// The prefix is everything before the first `':'`; the message follows it
/// with leading spaces stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProcessor;

impl LogProcessor {
    /// Creates a new log processor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DataProcessor for LogProcessor {
    fn validate(&self, data: &Value) -> bool {
        matches!(data, Value::Text(s) if !s.is_empty())
    }

    fn process(&self, data: &Value) -> String {
        debug!(shape = data.type_name(), "processing log entry");
        let Value::Text(s) = data else {
            return "Invalid log data".to_string();
        };
        if s.is_empty() {
            return "Invalid log data".to_string();
        }

        let (prefix, message) = s
            .split_once(':')
            .map_or((s.as_str(), ""), |(p, m)| (p, m.trim_start()));

        match prefix {
            "ERROR" => format!("[ALERT] ERROR level detected: {message}"),
            "INFO" => format!("[INFO] INFO level detected: {message}"),
            "WARNING" => format!("[WARN] WARNING level detected: {message}"),
            _ => format!("[LOG] {prefix} detected: {message}"),
        }
    }
}
