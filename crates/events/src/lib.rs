//! Event contracts and in-process distribution.
//!
//! Slotting changes are published as events so that downstream consumers
//! (task planners, label printers, audit logs) can react without the engine
//! knowing about them.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
