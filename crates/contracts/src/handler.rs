//! RecordHandler trait - post-decode action interface
//!
//! The seam through which a deployment plugs in persistence, forwarding, or
//! plain audit logging. The dispatcher invokes it exactly once per
//! successfully decoded payload and never on a failed decode.

use crate::{ContractError, Record, Topic};

/// Post-decode action.
///
/// Invoked through `&self` so a single handler instance can serve
/// concurrent `process_payload` calls; implementations must be `Sync` or
/// serialize internally.
#[trait_variant::make(RecordHandler: Send)]
pub trait LocalRecordHandler {
    /// Handler name (used for logging/diagnostics)
    fn name(&self) -> &str;

    /// Consume one decoded record.
    ///
    /// # Errors
    /// Any error is propagated unchanged to the transport layer; the
    /// dispatcher never retries on its own.
    async fn handle(&self, topic: Topic, record: &Record) -> Result<(), ContractError>;

    /// Release handler resources on shutdown.
    ///
    /// Called at most once, by the first dispatcher `close`.
    async fn close(&self) -> Result<(), ContractError>;
}
