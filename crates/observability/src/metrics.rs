//! Payload outcome metric collection
//!
//! Records one metric event per processed `(payload, topic)` pair, plus an
//! in-memory aggregator for end-of-run summaries.

use metrics::{counter, histogram};
use std::collections::HashMap;

/// Outcome of one `process_payload` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOutcome {
    /// Decoded and handled
    Processed,
    /// Topic outside the known catalog
    UnknownTopic,
    /// Payload did not decode
    DecodeFailure,
    /// Handler rejected the decoded record
    HandlerFailure,
}

impl PayloadOutcome {
    /// Metric label value
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::UnknownTopic => "unknown_topic",
            Self::DecodeFailure => "decode_failure",
            Self::HandlerFailure => "handler_failure",
        }
    }
}

/// Record the outcome of one processed payload
pub fn record_payload_processed(topic: &str, outcome: PayloadOutcome) {
    counter!(
        "connector_payloads_total",
        "topic" => topic.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Record the raw size of one received payload
pub fn record_payload_bytes(topic: &str, bytes: usize) {
    histogram!(
        "connector_payload_bytes",
        "topic" => topic.to_string()
    )
    .record(bytes as f64);
}

/// Record a dispatcher shutdown
pub fn record_dispatcher_closed() {
    counter!("connector_dispatcher_closed_total").increment(1);
}

/// In-memory aggregation of payload outcomes
///
/// For summaries at the end of a run, independent of the Prometheus
/// exporter.
#[derive(Debug, Clone, Default)]
pub struct DispatchStatsAggregator {
    /// Total payloads observed
    pub total_payloads: u64,

    /// Successfully processed payloads
    pub processed: u64,

    /// Unknown-topic rejections
    pub unknown_topic: u64,

    /// Decode failures
    pub decode_failures: u64,

    /// Handler failures
    pub handler_failures: u64,

    /// Payload counts per topic string
    pub per_topic: HashMap<String, u64>,

    /// Payload size statistics
    bytes_stats: RunningStats,
}

impl DispatchStatsAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Update with one payload outcome
    pub fn update(&mut self, topic: &str, outcome: PayloadOutcome, bytes: usize) {
        self.total_payloads += 1;
        *self.per_topic.entry(topic.to_string()).or_insert(0) += 1;
        self.bytes_stats.push(bytes as f64);

        match outcome {
            PayloadOutcome::Processed => self.processed += 1,
            PayloadOutcome::UnknownTopic => self.unknown_topic += 1,
            PayloadOutcome::DecodeFailure => self.decode_failures += 1,
            PayloadOutcome::HandlerFailure => self.handler_failures += 1,
        }
    }

    /// Generate a summary report
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            total_payloads: self.total_payloads,
            processed: self.processed,
            unknown_topic: self.unknown_topic,
            decode_failures: self.decode_failures,
            handler_failures: self.handler_failures,
            success_rate: if self.total_payloads > 0 {
                self.processed as f64 / self.total_payloads as f64 * 100.0
            } else {
                0.0
            },
            payload_bytes_min: self.bytes_stats.min(),
            payload_bytes_mean: self.bytes_stats.mean(),
            payload_bytes_max: self.bytes_stats.max(),
            per_topic: self.per_topic.clone(),
        }
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Aggregated summary (for reporting)
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub total_payloads: u64,
    pub processed: u64,
    pub unknown_topic: u64,
    pub decode_failures: u64,
    pub handler_failures: u64,
    pub success_rate: f64,
    pub payload_bytes_min: f64,
    pub payload_bytes_mean: f64,
    pub payload_bytes_max: f64,
    pub per_topic: HashMap<String, u64>,
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Dispatch Stats Summary ===")?;
        writeln!(f, "Total payloads: {}", self.total_payloads)?;
        writeln!(
            f,
            "Processed: {} ({:.2}%)",
            self.processed, self.success_rate
        )?;
        writeln!(f, "Unknown topic: {}", self.unknown_topic)?;
        writeln!(f, "Decode failures: {}", self.decode_failures)?;
        writeln!(f, "Handler failures: {}", self.handler_failures)?;
        writeln!(
            f,
            "Payload bytes: min={:.0}, mean={:.1}, max={:.0}",
            self.payload_bytes_min, self.payload_bytes_mean, self.payload_bytes_max
        )?;

        if !self.per_topic.is_empty() {
            writeln!(f, "Per-topic counts:")?;
            for (topic, count) in &self.per_topic {
                writeln!(f, "  {}: {}", topic, count)?;
            }
        }

        Ok(())
    }
}

/// Online min/mean/max calculator
#[derive(Debug, Clone, Default)]
struct RunningStats {
    count: u64,
    mean: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
        }
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }
}
