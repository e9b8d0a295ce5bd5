//! Inbound parsing and outbound formatting of time zone values.
//!
//! # Invariants
//! - Date-times travel as `YYYY-MM-DDThh:mm:ss`, no fraction, no suffix.
//! - Offsets travel as `+HH:MM`/`-HH:MM`; zero is always `+00:00`.
//! - Offsets stay within -18:00..=+18:00.

use crate::mapper::validator::{validate, ValidationError};
use crate::model::time_zone::{TimeZoneFields, TimeZoneInput, TimeZoneOutput, TimeZoneRecord};
use chrono::{FixedOffset, NaiveDateTime, Timelike};

/// `strftime` pattern shared by parsing and formatting.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// Validates `input` and parses it into record fields.
///
/// # Errors
/// - Whatever `validate` reports, unchanged.
/// - `DateTimeFormat` when the pattern matches but the calendar value does
///   not exist (month 13, Feb 30, second 60).
/// - `OffsetFormat` when minutes exceed 59 or the magnitude exceeds 18:00.
pub fn to_fields(input: &TimeZoneInput) -> Result<TimeZoneFields, ValidationError> {
    validate(input)?;

    // validate() guarantees all three are present and non-empty.
    let label = input.label.clone().unwrap_or_default();
    let date_time = parse_date_time(input.date_time.as_deref().unwrap_or_default())
        .ok_or(ValidationError::DateTimeFormat)?;
    let offset_from_utc = parse_offset(input.offset_from_utc.as_deref().unwrap_or_default())
        .ok_or(ValidationError::OffsetFormat)?;

    Ok(TimeZoneFields {
        label,
        date_time,
        offset_from_utc,
    })
}

/// Renders a stored record in its flat outbound form.
pub fn to_output(record: &TimeZoneRecord) -> TimeZoneOutput {
    TimeZoneOutput {
        id: record.id,
        label: record.label.clone(),
        date_time: format_date_time(record.date_time),
        offset_from_utc: format_offset(record.offset_from_utc),
        created_at: format_date_time(record.created_at),
        updated_at: format_date_time(record.updated_at),
    }
}

/// Parses `YYYY-MM-DDThh:mm:ss`; `None` for anything else, leap seconds
/// included.
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT).ok()?;
    if parsed.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(parsed)
}

pub fn format_date_time(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Parses `[+-]HH:MM` into a fixed offset bounded by ±18:00.
pub fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes > 59 {
        return None;
    }

    let total = hours * 3600 + minutes * 60;
    if total > MAX_OFFSET_SECONDS {
        return None;
    }
    FixedOffset::east_opt(sign * total)
}

/// Formats an offset as `+HH:MM`/`-HH:MM`. Zero renders as `+00:00`.
pub fn format_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let magnitude = seconds.unsigned_abs();
    format!("{sign}{:02}:{:02}", magnitude / 3600, (magnitude % 3600) / 60)
}
