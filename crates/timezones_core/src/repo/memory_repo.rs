//! In-memory time zone store.
//!
//! Useful for embedding and tests where no database file is wanted. Ids
//! start at 1 and increase monotonically; deleted ids are never reissued.

use crate::model::time_zone::{TimeZoneId, TimeZoneRecord};
use crate::repo::time_zone_repo::{StoreResult, TimeZoneStore};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: TimeZoneId,
    records: BTreeMap<TimeZoneId, TimeZoneRecord>,
}

/// Ordered map store guarded by a mutex.
#[derive(Debug, Default)]
pub struct InMemoryTimeZoneStore {
    state: Mutex<MemoryState>,
}

impl InMemoryTimeZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panic while holding the lock cannot leave a half-written record:
        // every mutation below is a single map operation.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TimeZoneStore for InMemoryTimeZoneStore {
    fn find_all(&self) -> StoreResult<Vec<TimeZoneRecord>> {
        Ok(self.lock().records.values().cloned().collect())
    }

    fn find_by_id(&self, id: TimeZoneId) -> StoreResult<Option<TimeZoneRecord>> {
        Ok(self.lock().records.get(&id).cloned())
    }

    fn save(&self, record: &TimeZoneRecord) -> StoreResult<TimeZoneRecord> {
        let mut state = self.lock();
        let id = match record.id {
            Some(id) => {
                state.last_id = state.last_id.max(id);
                id
            }
            None => {
                state.last_id += 1;
                state.last_id
            }
        };

        let stored = TimeZoneRecord {
            id: Some(id),
            ..record.clone()
        };
        state.records.insert(id, stored.clone());
        Ok(stored)
    }

    fn delete_by_id(&self, id: TimeZoneId) -> StoreResult<()> {
        self.lock().records.remove(&id);
        Ok(())
    }
}
