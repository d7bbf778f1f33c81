//! Configuration validation
//!
//! Rules:
//! - url is non-empty
//! - retry_duration_secs > 0

use contracts::{ConnectorConfig, ContractError};

/// Validate a ConnectorConfig
///
/// Returns the first encountered error, or Ok(()).
pub fn validate(config: &ConnectorConfig) -> Result<(), ContractError> {
    validate_url(config)?;
    validate_retry_duration(config)?;
    Ok(())
}

fn validate_url(config: &ConnectorConfig) -> Result<(), ContractError> {
    if config.web_socket.url.trim().is_empty() {
        return Err(ContractError::config_validation(
            "web_socket.url",
            "cannot be empty",
        ));
    }
    Ok(())
}

fn validate_retry_duration(config: &ConnectorConfig) -> Result<(), ContractError> {
    if config.web_socket.retry_duration_secs == 0 {
        return Err(ContractError::config_validation(
            "web_socket.retry_duration_secs",
            "must be > 0",
        ));
    }
    Ok(())
}
