//! Location data model.
//!
//! In-memory representation of warehouse locations with just enough state to
//! reason about slotting: identity, hierarchy position, kind, status,
//! slotting class, distance from dock, pick-path sequence, capacity and
//! dimensions. The hierarchy-management system owns these records; this
//! crate only enforces their invariants.

pub mod capacity;
pub mod dimensions;
pub mod event;
pub mod kind;
pub mod record;
pub mod slotting_class;
pub mod status;

pub use capacity::Capacity;
pub use dimensions::Dimensions;
pub use event::LocationSlottingChanged;
pub use kind::LocationKind;
pub use record::{LocationRecord, PhysicalAddress, PICK_PATH_SEQUENCE_STEP};
pub use slotting_class::SlottingClass;
pub use status::LocationStatus;
