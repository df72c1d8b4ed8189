//! `slotmaster-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no transport).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{AggregateRoot, ExpectedVersion};
pub use error::{DomainError, DomainResult};
pub use id::{LocationId, WarehouseId};
pub use value_object::ValueObject;
