//! Conversion between wire inputs/outputs and stored records.
//!
//! # Responsibility
//! - Validate caller input before anything is parsed or persisted.
//! - Render stored values in the fixed outbound string formats.
//!
//! # Invariants
//! - Inbound mapping never yields fields that failed validation.
//! - Outbound mapping performs no validation.

pub mod time_zone_mapper;
pub mod validator;
