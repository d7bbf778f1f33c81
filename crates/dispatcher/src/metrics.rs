//! Dispatch metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for every dispatch outcome
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Payloads decoded and handled successfully
    processed_count: AtomicU64,
    /// Payloads rejected for an unknown topic
    unknown_topic_count: AtomicU64,
    /// Payloads that failed to decode
    decode_failure_count: AtomicU64,
    /// Decoded records rejected by the handler
    handler_failure_count: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get processed count
    pub fn processed_count(&self) -> u64 {
        self.processed_count.load(Ordering::Relaxed)
    }

    /// Increment processed count
    pub fn inc_processed(&self) {
        self.processed_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get unknown-topic count
    pub fn unknown_topic_count(&self) -> u64 {
        self.unknown_topic_count.load(Ordering::Relaxed)
    }

    /// Increment unknown-topic count
    pub fn inc_unknown_topic(&self) {
        self.unknown_topic_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get decode failure count
    pub fn decode_failure_count(&self) -> u64 {
        self.decode_failure_count.load(Ordering::Relaxed)
    }

    /// Increment decode failure count
    pub fn inc_decode_failure(&self) {
        self.decode_failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get handler failure count
    pub fn handler_failure_count(&self) -> u64 {
        self.handler_failure_count.load(Ordering::Relaxed)
    }

    /// Increment handler failure count
    pub fn inc_handler_failure(&self) {
        self.handler_failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> DispatchSnapshot {
        DispatchSnapshot {
            processed_count: self.processed_count(),
            unknown_topic_count: self.unknown_topic_count(),
            decode_failure_count: self.decode_failure_count(),
            handler_failure_count: self.handler_failure_count(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct DispatchSnapshot {
    pub processed_count: u64,
    pub unknown_topic_count: u64,
    pub decode_failure_count: u64,
    pub handler_failure_count: u64,
}
