//! Infrastructure layer: location persistence, configuration loading and the
//! slotting application service.
//!
//! Everything here composes traits (`LocationRepository`, `EventBus`) so the
//! in-memory implementations used in tests can be swapped for real backends.

pub mod config;
pub mod repository;
pub mod slotting_service;

#[cfg(test)]
mod integration_tests;

pub use config::ConfigLoadError;
pub use repository::{InMemoryLocationRepository, LocationRepository, RepositoryError};
pub use slotting_service::{
    AUTOMATIC_OPTIMIZATION_REASON, LOCATION_AGGREGATE_TYPE, SlottingBalanceReport, SlottingService,
    SlottingServiceError,
};
