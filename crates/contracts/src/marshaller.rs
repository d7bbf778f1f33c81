//! Marshaller trait - byte-level codec interface
//!
//! The dispatcher never inspects payload bytes itself; every decode goes
//! through this seam. The wire format (JSON, bincode, ...) is a deployment
//! concern selected by configuration.

use serde::{Deserialize, Serialize};

use crate::{ContractError, Record, RecordKind};

/// Byte-level record codec.
///
/// Implementations must be stateless or internally synchronized: the
/// dispatcher shares one marshaller across concurrently processed payloads.
pub trait Marshaller: Send + Sync {
    /// Codec name (used for logging/diagnostics)
    fn name(&self) -> &str;

    /// Encode a record into its wire form.
    ///
    /// # Errors
    /// Returns [`ContractError::Marshal`] when the record cannot be encoded.
    fn marshal(&self, record: &Record) -> Result<Vec<u8>, ContractError>;

    /// Decode payload bytes into the record shape named by `kind`.
    ///
    /// # Errors
    /// Returns [`ContractError::Unmarshal`] when the bytes do not form a
    /// valid encoding of that record type.
    fn unmarshal(&self, kind: RecordKind, bytes: &[u8]) -> Result<Record, ContractError>;
}

/// Wire format selector, part of the connector configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarshallerKind {
    /// Human-readable JSON framing
    #[default]
    Json,
    /// Compact binary framing
    Bincode,
}
