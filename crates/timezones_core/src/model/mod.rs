//! Time zone domain model.
//!
//! # Responsibility
//! - Define the stored record and the wire shapes exchanged with callers.
//! - Keep parsed values (`NaiveDateTime`, `FixedOffset`) separate from their
//!   string forms.
//!
//! # Invariants
//! - Every persisted record has a store-assigned `TimeZoneId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod time_zone;
