use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are immutable facts (e.g. "location BIN-7 moved from class B to A"),
/// versioned for schema evolution.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "locations.location.slotting_changed").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
