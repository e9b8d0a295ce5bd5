//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, timestamping and store calls per operation.
//! - Keep transport layers decoupled from storage details.

pub mod clock;
pub mod time_zone_service;
