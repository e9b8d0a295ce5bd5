//! Store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the keyed collection contract the service persists through.
//! - Keep SQL details out of service orchestration.
//!
//! # Invariants
//! - Stores assign ids on first save and never reuse them.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod memory_repo;
pub mod time_zone_repo;
