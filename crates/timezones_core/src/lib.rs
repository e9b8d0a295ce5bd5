//! Core domain logic for the time zone catalog.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use mapper::time_zone_mapper::{to_fields, to_output};
pub use mapper::validator::{validate, ValidationError};
pub use model::time_zone::{
    TimeZoneFields, TimeZoneId, TimeZoneInput, TimeZoneOutput, TimeZoneRecord,
};
pub use repo::memory_repo::InMemoryTimeZoneStore;
pub use repo::time_zone_repo::{SqliteTimeZoneStore, StoreError, StoreResult, TimeZoneStore};
pub use service::clock::{Clock, SystemClock};
pub use service::time_zone_service::{ServiceError, ServiceResult, TimeZoneService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
