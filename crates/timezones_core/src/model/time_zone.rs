//! Time zone record and wire models.
//!
//! # Responsibility
//! - Define `TimeZoneRecord`, the canonical stored form.
//! - Define `TimeZoneInput`/`TimeZoneOutput`, the flat JSON shapes.
//!
//! # Invariants
//! - `id` is assigned by the store on first save and never changes.
//! - `created_at` is set once; `updated_at` is refreshed on every update.
//! - `created_at <= updated_at`.

use chrono::{FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a time zone record.
pub type TimeZoneId = i64;

/// Validated, parsed mutable fields of a record.
///
/// Produced by the mapper from a `TimeZoneInput`; carries no identity and no
/// timestamps, so it can never be mistaken for a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZoneFields {
    pub label: String,
    pub date_time: NaiveDateTime,
    pub offset_from_utc: FixedOffset,
}

/// Canonical stored form of a time zone entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZoneRecord {
    /// `None` until the first save.
    pub id: Option<TimeZoneId>,
    /// Human label, e.g. `Europe/Paris`. Not unique.
    pub label: String,
    /// Local wall-clock value, second precision, no offset attached.
    pub date_time: NaiveDateTime,
    /// Fixed offset from UTC, within -18:00..=+18:00.
    pub offset_from_utc: FixedOffset,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TimeZoneRecord {
    /// Builds an unsaved record stamped with `now` for both timestamps.
    pub fn new(fields: TimeZoneFields, now: NaiveDateTime) -> Self {
        Self {
            id: None,
            label: fields.label,
            date_time: fields.date_time,
            offset_from_utc: fields.offset_from_utc,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the mutable fields and refreshes `updated_at`.
    ///
    /// `id` and `created_at` are left untouched. A wall clock that stepped
    /// back (DST fall-back, NTP correction) never stamps `updated_at` before
    /// `created_at`.
    pub fn apply(&mut self, fields: TimeZoneFields, now: NaiveDateTime) {
        self.label = fields.label;
        self.date_time = fields.date_time;
        self.offset_from_utc = fields.offset_from_utc;
        self.updated_at = now.max(self.created_at);
    }
}

/// Caller-supplied, not yet validated record fields.
///
/// Every field is optional so that absent and empty values reach the
/// validator and produce its specific error instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeZoneInput {
    pub label: Option<String>,
    #[serde(rename = "dateTime")]
    pub date_time: Option<String>,
    #[serde(rename = "offsetFromUTC")]
    pub offset_from_utc: Option<String>,
}

impl TimeZoneInput {
    pub fn new(
        label: impl Into<String>,
        date_time: impl Into<String>,
        offset_from_utc: impl Into<String>,
    ) -> Self {
        Self {
            label: Some(label.into()),
            date_time: Some(date_time.into()),
            offset_from_utc: Some(offset_from_utc.into()),
        }
    }
}

/// Flat outbound representation of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeZoneOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TimeZoneId>,
    pub label: String,
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "offsetFromUTC")]
    pub offset_from_utc: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}
