//! ConnectorConfig - connector configuration schema
//!
//! Describes how the embedding process connects to the ws outport driver
//! and which wire codec it speaks. The dispatcher core only consumes the
//! marshaller selection; the transport settings are passed through to the
//! connection layer.

use serde::{Deserialize, Serialize};

use crate::MarshallerKind;

/// Top-level connector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Web socket client settings
    pub web_socket: WebSocketConfig,
}

/// Web socket client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSocketConfig {
    /// Outport driver endpoint (host:port)
    pub url: String,

    /// Wire codec for payload decoding
    #[serde(default)]
    pub marshaller_type: MarshallerKind,

    /// Reconnect retry interval in seconds
    #[serde(default = "default_retry_duration_secs")]
    pub retry_duration_secs: u32,

    /// Whether to acknowledge every processed message
    #[serde(default = "default_true")]
    pub with_acknowledge: bool,

    /// Whether a processing error blocks the acknowledgement
    #[serde(default)]
    pub blocking_ack_on_error: bool,
}

fn default_retry_duration_secs() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            url: "localhost:22111".to_string(),
            marshaller_type: MarshallerKind::default(),
            retry_duration_secs: default_retry_duration_secs(),
            with_acknowledge: true,
            blocking_ack_on_error: false,
        }
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            web_socket: WebSocketConfig::default(),
        }
    }
}
