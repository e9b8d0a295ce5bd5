//! Time zone use-case service.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete entry points for callers.
//! - Validate input, stamp timestamps and check existence before any write.
//!
//! # Invariants
//! - Validation runs before the existence check in `update`.
//! - A failed operation performs no store mutation.
//! - The clock is read at most once per operation.

use crate::mapper::time_zone_mapper::to_fields;
use crate::mapper::validator::ValidationError;
use crate::model::time_zone::{TimeZoneId, TimeZoneInput, TimeZoneRecord};
use crate::repo::time_zone_repo::{StoreError, TimeZoneStore};
use crate::service::clock::{Clock, SystemClock};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a service operation.
///
/// `Validation` and `NotFound` are client-input errors and are never
/// retried. `Store` wraps failures of the persistence collaborator.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    NotFound(TimeZoneId),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "Time zone with id: {id} not found"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case service over a time zone store.
pub struct TimeZoneService<S: TimeZoneStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: TimeZoneStore> TimeZoneService<S> {
    /// Creates a service stamping records with the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: TimeZoneStore, C: Clock> TimeZoneService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists every record in store order.
    pub fn list(&self) -> ServiceResult<Vec<TimeZoneRecord>> {
        Ok(self.store.find_all()?)
    }

    /// Gets one record by id.
    ///
    /// # Errors
    /// - `NotFound(id)` when no record has this id.
    pub fn get_by_id(&self, id: TimeZoneId) -> ServiceResult<TimeZoneRecord> {
        self.require(id)
    }

    /// Validates `input` and persists a new record.
    ///
    /// `created_at` and `updated_at` receive the same clock reading.
    pub fn create(&self, input: &TimeZoneInput) -> ServiceResult<TimeZoneRecord> {
        let fields = to_fields(input)?;
        let record = TimeZoneRecord::new(fields, self.clock.now());
        let saved = self.store.save(&record)?;

        info!(
            "event=time_zone_create module=service status=ok id={}",
            saved.id.map_or_else(|| "none".to_string(), |id| id.to_string())
        );
        Ok(saved)
    }

    /// Replaces the mutable fields of an existing record.
    ///
    /// # Errors
    /// - Validation errors, reported even when `id` does not exist.
    /// - `NotFound(id)` for valid input on a missing id.
    pub fn update(&self, id: TimeZoneId, input: &TimeZoneInput) -> ServiceResult<TimeZoneRecord> {
        let fields = to_fields(input)?;
        let mut record = self.require(id)?;
        record.apply(fields, self.clock.now());
        let saved = self.store.save(&record)?;

        info!("event=time_zone_update module=service status=ok id={id}");
        Ok(saved)
    }

    /// Deletes an existing record.
    ///
    /// # Errors
    /// - `NotFound(id)` when absent; the store is left untouched.
    pub fn delete(&self, id: TimeZoneId) -> ServiceResult<()> {
        self.require(id)?;
        self.store.delete_by_id(id)?;

        info!("event=time_zone_delete module=service status=ok id={id}");
        Ok(())
    }

    fn require(&self, id: TimeZoneId) -> ServiceResult<TimeZoneRecord> {
        match self.store.find_by_id(id)? {
            Some(record) => Ok(record),
            None => {
                debug!("event=time_zone_lookup module=service status=not_found id={id}");
                Err(ServiceError::NotFound(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ServiceError, TimeZoneService};
    use crate::mapper::time_zone_mapper::to_output;
    use crate::mapper::validator::ValidationError;
    use crate::model::time_zone::{TimeZoneId, TimeZoneInput, TimeZoneRecord};
    use crate::repo::memory_repo::InMemoryTimeZoneStore;
    use crate::repo::time_zone_repo::{StoreResult, TimeZoneStore};
    use crate::service::clock::Clock;
    use chrono::{DateTime, NaiveDateTime};
    use std::cell::{Cell, RefCell};

    /// Clock advancing one minute per reading.
    struct StepClock {
        next: Cell<i64>,
    }

    impl StepClock {
        fn starting_at(epoch_seconds: i64) -> Self {
            Self {
                next: Cell::new(epoch_seconds),
            }
        }

        fn readings(&self, start: i64) -> i64 {
            (self.next.get() - start) / 60
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> NaiveDateTime {
            let current = self.next.get();
            self.next.set(current + 60);
            DateTime::from_timestamp(current, 0).unwrap().naive_utc()
        }
    }

    /// Store wrapper recording every call made through it.
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemoryTimeZoneStore,
        calls: RefCell<Vec<&'static str>>,
    }

    impl RecordingStore {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }
    }

    impl TimeZoneStore for RecordingStore {
        fn find_all(&self) -> StoreResult<Vec<TimeZoneRecord>> {
            self.calls.borrow_mut().push("find_all");
            self.inner.find_all()
        }

        fn find_by_id(&self, id: TimeZoneId) -> StoreResult<Option<TimeZoneRecord>> {
            self.calls.borrow_mut().push("find_by_id");
            self.inner.find_by_id(id)
        }

        fn save(&self, record: &TimeZoneRecord) -> StoreResult<TimeZoneRecord> {
            self.calls.borrow_mut().push("save");
            self.inner.save(record)
        }

        fn delete_by_id(&self, id: TimeZoneId) -> StoreResult<()> {
            self.calls.borrow_mut().push("delete_by_id");
            self.inner.delete_by_id(id)
        }
    }

    const START: i64 = 1_704_067_200;

    fn service() -> TimeZoneService<RecordingStore, StepClock> {
        TimeZoneService::with_clock(RecordingStore::default(), StepClock::starting_at(START))
    }

    fn utc_input() -> TimeZoneInput {
        TimeZoneInput::new("UTC", "2024-01-01T12:00:00", "+00:00")
    }

    #[test]
    fn create_assigns_id_and_equal_timestamps() {
        let service = service();
        let created = service.create(&utc_input()).unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(service.clock.readings(START), 1);

        let output = to_output(&created);
        assert_eq!(output.date_time, "2024-01-01T12:00:00");
        assert_eq!(output.offset_from_utc, "+00:00");
    }

    #[test]
    fn create_with_invalid_input_touches_nothing() {
        let service = service();
        let err = service
            .create(&TimeZoneInput::new("UTC", "2024-01-01", "+00:00"))
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::DateTimeFormat)
        ));
        assert!(service.store().calls().is_empty());
        assert_eq!(service.clock.readings(START), 0);
    }

    #[test]
    fn get_by_id_reports_not_found() {
        let service = service();
        let err = service.get_by_id(42).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(42)));
        assert_eq!(err.to_string(), "Time zone with id: 42 not found");
    }

    #[test]
    fn list_returns_records_in_insertion_order() {
        let service = service();
        service
            .create(&TimeZoneInput::new("Europe/Paris", "2024-01-01T00:00:00", "+01:00"))
            .unwrap();
        service
            .create(&TimeZoneInput::new("America/Lima", "2024-01-01T00:00:00", "-05:00"))
            .unwrap();

        let labels: Vec<_> = service
            .list()
            .unwrap()
            .into_iter()
            .map(|record| record.label)
            .collect();
        assert_eq!(labels, ["Europe/Paris", "America/Lima"]);
    }

    #[test]
    fn update_preserves_created_at_and_advances_updated_at() {
        let service = service();
        let created = service.create(&utc_input()).unwrap();
        let id = created.id.unwrap();

        let updated = service
            .update(
                id,
                &TimeZoneInput::new("Asia/Kolkata", "2024-06-01T08:30:00", "+05:30"),
            )
            .unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.label, "Asia/Kolkata");
        assert_eq!(to_output(&updated).offset_from_utc, "+05:30");
        assert_eq!(service.get_by_id(id).unwrap(), updated);
    }

    /// Clock stepping one hour back per reading.
    struct RewindClock(Cell<i64>);

    impl Clock for RewindClock {
        fn now(&self) -> NaiveDateTime {
            let current = self.0.get();
            self.0.set(current - 3600);
            DateTime::from_timestamp(current, 0).unwrap().naive_utc()
        }
    }

    #[test]
    fn update_after_clock_steps_back_keeps_updated_at_after_created_at() {
        let service = TimeZoneService::with_clock(
            InMemoryTimeZoneStore::new(),
            RewindClock(Cell::new(START)),
        );
        let created = service.create(&utc_input()).unwrap();
        let id = created.id.unwrap();

        let updated = service
            .update(id, &TimeZoneInput::new("UTC", "2024-02-01T00:00:00", "+00:00"))
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, created.created_at);
        assert!(updated.created_at <= updated.updated_at);
    }

    #[test]
    fn update_missing_id_with_valid_input_is_not_found() {
        let service = service();
        let err = service.update(7, &utc_input()).unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(7)));
        assert_eq!(service.store().calls(), ["find_by_id"]);
    }

    #[test]
    fn update_reports_validation_before_existence() {
        let service = service();
        let invalid = TimeZoneInput {
            label: None,
            ..utc_input()
        };
        let err = service.update(7, &invalid).unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ValidationError::Label)));
        assert!(service.store().calls().is_empty());
    }

    #[test]
    fn delete_missing_id_performs_no_mutation() {
        let service = service();
        service.create(&utc_input()).unwrap();

        let err = service.delete(99).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(99)));
        assert_eq!(service.store().calls(), ["save", "find_by_id"]);
        assert_eq!(service.store().inner.len(), 1);
    }

    #[test]
    fn delete_existing_id_removes_record() {
        let service = service();
        let id = service.create(&utc_input()).unwrap().id.unwrap();

        service.delete(id).unwrap();
        assert!(matches!(
            service.get_by_id(id).unwrap_err(),
            ServiceError::NotFound(missing) if missing == id
        ));
    }

    #[test]
    fn closure_clock_is_accepted() {
        let fixed = DateTime::from_timestamp(START, 0).unwrap().naive_utc();
        let service = TimeZoneService::with_clock(InMemoryTimeZoneStore::new(), move || fixed);
        let created = service.create(&utc_input()).unwrap();
        assert_eq!(created.created_at, fixed);
    }
}
