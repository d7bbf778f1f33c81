//! Layered error definitions
//!
//! Categorized by source: config / codec / handler

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Codec Errors =====
    /// Record encode error
    #[error("codec '{codec}' marshal error: {message}")]
    Marshal { codec: String, message: String },

    /// Record decode error
    #[error("codec '{codec}' unmarshal error: {message}")]
    Unmarshal { codec: String, message: String },

    // ===== Handler Errors =====
    /// Post-decode handler error
    #[error("handler '{handler}' error: {message}")]
    Handler { handler: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create record encode error
    pub fn marshal(codec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Marshal {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create record decode error
    pub fn unmarshal(codec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unmarshal {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create post-decode handler error
    pub fn handler(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            handler: handler.into(),
            message: message.into(),
        }
    }
}
