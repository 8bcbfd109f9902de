//! Standalone batch stream analyzers.
//!
//! Like the processors, these are leaf utilities outside the pipeline core.
//! Each stream summarizes one batch at a time and keeps running counters,
//! the only mutable state in the crate.

use crate::value::{Mapping, Value};
use tracing::debug;

/// Trait for batch stream analyzers.
pub trait DataStream {
    /// Processes one batch and returns a summary line.
    fn process_batch(&mut self, batch: &[Value]) -> String;

    /// Returns the stream's running statistics as a mapping.
    fn get_stats(&self) -> Value;

    /// Filters a batch by an optional criteria string. Pass-through by
    /// default.
    fn filter_data(&self, batch: &[Value], _criteria: Option<&str>) -> Vec<Value> {
        batch.to_vec()
    }
}

fn numeric_batch(batch: &[Value]) -> Option<Vec<f64>> {
    if batch.is_empty() {
        return None;
    }
    batch
        .iter()
        .map(|item| match item {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        })
        .collect()
}

fn stats_entry(stream: &str, stream_id: &str) -> Mapping {
    let mut entries = Mapping::new();
    entries.insert("stream".to_string(), Value::from(stream));
    entries.insert("stream_id".to_string(), Value::from(stream_id));
    entries
}

fn count_value(count: usize) -> Value {
    Value::Int(i64::try_from(count).unwrap_or(i64::MAX))
}

/// Averages numeric sensor readings per batch.
#[derive(Debug, Clone)]
pub struct SensorStream {
    stream_id: String,
    batches_processed: usize,
    readings_processed: usize,
}

impl SensorStream {
    /// Creates a new sensor stream.
    #[must_use]
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            batches_processed: 0,
            readings_processed: 0,
        }
    }
}

impl DataStream for SensorStream {
    fn process_batch(&mut self, batch: &[Value]) -> String {
        debug!(stream_id = %self.stream_id, size = batch.len(), "processing sensor batch");
        let Some(readings) = numeric_batch(batch) else {
            return "Invalid sensor batch".to_string();
        };

        self.batches_processed += 1;
        self.readings_processed += readings.len();
        let avg = readings.iter().sum::<f64>() / readings.len() as f64;
        format!(
            "Sensor {}: {} readings, avg: {avg}",
            self.stream_id,
            readings.len()
        )
    }

    fn get_stats(&self) -> Value {
        let mut entries = stats_entry("SensorStream", &self.stream_id);
        entries.insert(
            "batches_processed".to_string(),
            count_value(self.batches_processed),
        );
        entries.insert(
            "readings_processed".to_string(),
            count_value(self.readings_processed),
        );
        Value::Mapping(entries)
    }
}

/// Totals numeric transaction amounts across batches.
#[derive(Debug, Clone)]
pub struct TransactionStream {
    stream_id: String,
    transactions_processed: usize,
    total_amount: f64,
}

impl TransactionStream {
    /// Creates a new transaction stream.
    #[must_use]
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            transactions_processed: 0,
            total_amount: 0.0,
        }
    }
}

impl DataStream for TransactionStream {
    fn process_batch(&mut self, batch: &[Value]) -> String {
        debug!(stream_id = %self.stream_id, size = batch.len(), "processing transaction batch");
        let Some(amounts) = numeric_batch(batch) else {
            return "Invalid transaction batch".to_string();
        };

        let batch_total: f64 = amounts.iter().sum();
        self.transactions_processed += amounts.len();
        self.total_amount += batch_total;
        format!(
            "Transactions {}: {} transactions, batch total: {batch_total}",
            self.stream_id,
            amounts.len()
        )
    }

    fn get_stats(&self) -> Value {
        let mut entries = stats_entry("TransactionStream", &self.stream_id);
        entries.insert(
            "transactions_processed".to_string(),
            count_value(self.transactions_processed),
        );
        entries.insert("total_amount".to_string(), Value::Float(self.total_amount));
        Value::Mapping(entries)
    }
}

/// Counts text event records per batch.
#[derive(Debug, Clone)]
pub struct EventStream {
    stream_id: String,
    events_processed: usize,
}

impl EventStream {
    /// Creates a new event stream.
    #[must_use]
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            events_processed: 0,
        }
    }
}

impl DataStream for EventStream {
    fn process_batch(&mut self, batch: &[Value]) -> String {
        debug!(stream_id = %self.stream_id, size = batch.len(), "processing event batch");
        if batch.is_empty() || !batch.iter().all(|item| matches!(item, Value::Text(_))) {
            return "Invalid event batch".to_string();
        }

        self.events_processed += batch.len();
        format!("Events {}: {} events logged", self.stream_id, batch.len())
    }

    fn get_stats(&self) -> Value {
        let mut entries = stats_entry("EventStream", &self.stream_id);
        entries.insert(
            "events_processed".to_string(),
            count_value(self.events_processed),
        );
        Value::Mapping(entries)
    }
}
