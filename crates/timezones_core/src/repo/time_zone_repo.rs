//! Time zone store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/save/delete over the `time_zones` table.
//! - Keep column encodings (text date-times, offset seconds) local to this
//!   file.
//!
//! # Invariants
//! - `save` inserts when `id` is `None` and replaces otherwise.
//! - Rows that do not decode into a valid record surface as `InvalidData`.

use crate::db::DbError;
use crate::mapper::time_zone_mapper::{format_date_time, parse_date_time};
use crate::model::time_zone::{TimeZoneId, TimeZoneRecord};
use chrono::FixedOffset;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TIME_ZONE_SELECT_SQL: &str = "SELECT
    id,
    label,
    date_time,
    offset_seconds,
    created_at,
    updated_at
FROM time_zones";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure raised by a store implementation.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted time zone data: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Keyed collection of time zone records.
pub trait TimeZoneStore {
    /// Returns every record in ascending id order.
    fn find_all(&self) -> StoreResult<Vec<TimeZoneRecord>>;
    fn find_by_id(&self, id: TimeZoneId) -> StoreResult<Option<TimeZoneRecord>>;
    /// Inserts or replaces `record`, returning it with its id assigned.
    fn save(&self, record: &TimeZoneRecord) -> StoreResult<TimeZoneRecord>;
    /// Removes the record if present; absent ids are not an error here.
    fn delete_by_id(&self, id: TimeZoneId) -> StoreResult<()>;
}

/// SQLite-backed time zone store.
pub struct SqliteTimeZoneStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTimeZoneStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TimeZoneStore for SqliteTimeZoneStore<'_> {
    fn find_all(&self) -> StoreResult<Vec<TimeZoneRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TIME_ZONE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_time_zone_row(row)?);
        }

        Ok(records)
    }

    fn find_by_id(&self, id: TimeZoneId) -> StoreResult<Option<TimeZoneRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TIME_ZONE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_time_zone_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, record: &TimeZoneRecord) -> StoreResult<TimeZoneRecord> {
        let label = record.label.as_str();
        let date_time = format_date_time(record.date_time);
        let offset_seconds = record.offset_from_utc.local_minus_utc();
        let created_at = format_date_time(record.created_at);
        let updated_at = format_date_time(record.updated_at);

        let id = match record.id {
            None => {
                self.conn.execute(
                    "INSERT INTO time_zones (
                        label,
                        date_time,
                        offset_seconds,
                        created_at,
                        updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5);",
                    params![label, date_time, offset_seconds, created_at, updated_at],
                )?;
                self.conn.last_insert_rowid()
            }
            Some(id) => {
                self.conn.execute(
                    "INSERT INTO time_zones (
                        id,
                        label,
                        date_time,
                        offset_seconds,
                        created_at,
                        updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    ON CONFLICT(id) DO UPDATE SET
                        label = excluded.label,
                        date_time = excluded.date_time,
                        offset_seconds = excluded.offset_seconds,
                        created_at = excluded.created_at,
                        updated_at = excluded.updated_at;",
                    params![id, label, date_time, offset_seconds, created_at, updated_at],
                )?;
                id
            }
        };

        Ok(TimeZoneRecord {
            id: Some(id),
            ..record.clone()
        })
    }

    fn delete_by_id(&self, id: TimeZoneId) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM time_zones WHERE id = ?1;", params![id])?;
        Ok(())
    }
}

fn parse_time_zone_row(row: &Row<'_>) -> StoreResult<TimeZoneRecord> {
    let id: TimeZoneId = row.get("id")?;

    let label: String = row.get("label")?;
    if label.is_empty() {
        return Err(StoreError::InvalidData(format!(
            "empty label in time_zones.label for id {id}"
        )));
    }

    let date_time = parse_date_column(row, "date_time", id)?;
    let created_at = parse_date_column(row, "created_at", id)?;
    let updated_at = parse_date_column(row, "updated_at", id)?;
    if updated_at < created_at {
        return Err(StoreError::InvalidData(format!(
            "updated_at precedes created_at for id {id}"
        )));
    }

    let offset_seconds: i32 = row.get("offset_seconds")?;
    let offset_from_utc = FixedOffset::east_opt(offset_seconds).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid offset `{offset_seconds}` in time_zones.offset_seconds for id {id}"
        ))
    })?;

    Ok(TimeZoneRecord {
        id: Some(id),
        label,
        date_time,
        offset_from_utc,
        created_at,
        updated_at,
    })
}

fn parse_date_column(
    row: &Row<'_>,
    column: &'static str,
    id: TimeZoneId,
) -> StoreResult<chrono::NaiveDateTime> {
    let text: String = row.get(column)?;
    parse_date_time(&text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid date-time `{text}` in time_zones.{column} for id {id}"
        ))
    })
}
