//! # Codec
//!
//! Concrete [`Marshaller`] implementations.
//!
//! Responsibilities:
//! - JSON framing ([`JsonMarshaller`])
//! - Compact binary framing ([`BincodeMarshaller`])
//! - Codec selection from configuration ([`create_marshaller`])

mod bincode;
mod json;

pub use crate::bincode::BincodeMarshaller;
pub use crate::json::JsonMarshaller;
pub use contracts::{Marshaller, MarshallerKind};

use std::sync::Arc;

/// Create the marshaller selected by configuration.
pub fn create_marshaller(kind: MarshallerKind) -> Arc<dyn Marshaller> {
    match kind {
        MarshallerKind::Json => Arc::new(JsonMarshaller::new()),
        MarshallerKind::Bincode => Arc::new(BincodeMarshaller::new()),
    }
}
