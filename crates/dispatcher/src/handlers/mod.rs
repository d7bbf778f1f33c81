//! Bundled RecordHandler implementations

mod audit;

pub use audit::AuditHandler;
