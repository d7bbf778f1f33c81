//! AuditHandler - logs decoded records via tracing
//!
//! The reference post-decode action: one audit line per decoded payload,
//! nothing persisted. Real deployments substitute a persistence or
//! forwarding handler behind the same trait.

use contracts::{ContractError, Record, RecordHandler, Topic};
use tracing::{info, instrument};

/// Handler that emits an audit log line per decoded record
pub struct AuditHandler {
    name: String,
}

impl AuditHandler {
    /// Create a new AuditHandler with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RecordHandler for AuditHandler {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "audit_handler_handle",
        skip(self, record),
        fields(handler = %self.name)
    )]
    async fn handle(&self, topic: Topic, record: &Record) -> Result<(), ContractError> {
        info!(
            handler = %self.name,
            topic = %topic,
            kind = ?record.kind(),
            "received payload"
        );
        Ok(())
    }

    #[instrument(name = "audit_handler_close", skip(self))]
    async fn close(&self) -> Result<(), ContractError> {
        info!(handler = %self.name, "AuditHandler closed");
        Ok(())
    }
}
