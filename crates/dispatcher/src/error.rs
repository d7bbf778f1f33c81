//! Dispatcher error types

use contracts::{ContractError, Topic};
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Required collaborator missing at construction
    #[error("invalid dependency: {0} not provided")]
    InvalidDependency(&'static str),

    /// Topic outside the known outport catalog
    #[error("unknown topic '{topic}', received data = {payload}")]
    UnknownTopic { topic: String, payload: String },

    /// Payload did not decode into the topic's record shape
    #[error("decode failure for topic '{topic}' ({bytes_len} bytes): {source}")]
    DecodeFailure {
        topic: Topic,
        bytes_len: usize,
        #[source]
        source: ContractError,
    },

    /// Post-decode handler rejected a successfully decoded record
    #[error("handler '{handler}' failed for topic '{topic}': {source}")]
    HandlerFailure {
        handler: String,
        topic: Topic,
        #[source]
        source: ContractError,
    },

    /// Handler teardown failed during close
    #[error("handler '{handler}' failed to close: {source}")]
    CloseFailure {
        handler: String,
        #[source]
        source: ContractError,
    },
}

impl DispatcherError {
    /// Create an unknown-topic error carrying the offending topic and the
    /// raw payload rendered as text, for diagnosability downstream.
    pub fn unknown_topic(topic: impl Into<String>, payload: &[u8]) -> Self {
        Self::UnknownTopic {
            topic: topic.into(),
            payload: String::from_utf8_lossy(payload).into_owned(),
        }
    }
}
