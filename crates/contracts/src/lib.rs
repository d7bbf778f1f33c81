//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Wire Model
//! - Every outport event arrives as an opaque `(payload, topic)` pair
//! - `Topic` is a closed enumeration agreed with the outport protocol
//! - Payload bytes are only ever interpreted through a [`Marshaller`]

mod config;
mod error;
mod handler;
mod marshaller;
mod record;
mod topic;

pub use config::*;
pub use error::*;
pub use handler::RecordHandler;
pub use marshaller::{Marshaller, MarshallerKind};
pub use record::*;
pub use topic::Topic;
