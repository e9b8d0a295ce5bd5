//! Presence and format checks for `TimeZoneInput`.
//!
//! Rules run in a fixed order and the first failing rule wins: presence of
//! label, date-time and offset, then the date-time pattern, then the offset
//! pattern.

use crate::model::time_zone::TimeZoneInput;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

// ASCII digits only; `\d` would also match other Unicode decimal digits.
static DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}$")
        .expect("valid date-time regex")
});
static OFFSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-][0-9]{2}:[0-9]{2}$").expect("valid offset regex"));

/// Client-input error raised when a `TimeZoneInput` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Label,
    DateTime,
    Offset,
    DateTimeFormat,
    OffsetFormat,
}

impl ValidationError {
    /// Fixed human-readable message returned to callers.
    pub fn message(self) -> &'static str {
        match self {
            Self::Label => "Time zone label should be a non-empty string",
            Self::DateTime => "Time zone date-time should be a non-empty string",
            Self::Offset => "Time zone offset should be a non-empty string",
            Self::DateTimeFormat => {
                "Time zone date-time should have an ISO 8601 format, for example: 2024-01-01T00:00:00"
            }
            Self::OffsetFormat => {
                "Time zone offset should have this specific format: +HH:mm or -HH:mm"
            }
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ValidationError {}

/// Checks `input` for presence and syntactic format.
///
/// Pure: no parsing into domain values happens here, so calendar-impossible
/// values such as `2024-13-45T00:00:00` pass and are rejected by the mapper.
pub fn validate(input: &TimeZoneInput) -> Result<(), ValidationError> {
    non_empty(input.label.as_deref()).ok_or(ValidationError::Label)?;
    let date_time = non_empty(input.date_time.as_deref()).ok_or(ValidationError::DateTime)?;
    let offset = non_empty(input.offset_from_utc.as_deref()).ok_or(ValidationError::Offset)?;

    if !DATE_TIME_RE.is_match(date_time) {
        return Err(ValidationError::DateTimeFormat);
    }
    if !OFFSET_RE.is_match(offset) {
        return Err(ValidationError::OffsetFormat);
    }

    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.is_empty())
}
