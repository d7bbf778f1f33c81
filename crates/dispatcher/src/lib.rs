//! # Dispatcher
//!
//! Topic-keyed payload dispatch module.
//!
//! Responsibilities:
//! - Validate incoming topics against the closed outport event catalog
//! - Decode payloads through the shared `Marshaller`
//! - Invoke the injected post-decode `RecordHandler` exactly once per
//!   successfully decoded payload, never on a failed one

pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod metrics;

pub use contracts::{Marshaller, Record, RecordHandler, RecordKind, Topic};
pub use dispatcher::{create_audit_dispatcher, create_dispatcher, Dispatcher, DispatcherBuilder};
pub use error::DispatcherError;
pub use handlers::AuditHandler;
pub use metrics::{DispatchMetrics, DispatchSnapshot};
