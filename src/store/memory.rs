//! In-memory record store.

use std::sync::{Mutex, MutexGuard};

use crate::ports::record_store::select_highest;
use crate::ports::{ListingRecord, RecordStore, StoreError, StoreFuture};

/// Keeps a collection in a `Vec` behind a mutex.
///
/// Used in tests and anywhere the allocator is embedded without a database.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<ListingRecord>>,
}

impl MemoryRecordStore {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection pre-populated with `records`, as if inserted
    /// out-of-band (imports, manual fixes).
    #[must_use]
    pub fn with_records(records: Vec<ListingRecord>) -> Self {
        Self { records: Mutex::new(records) }
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Result<Vec<ListingRecord>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ListingRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("memory store lock poisoned: {e}")))
    }
}

impl RecordStore for MemoryRecordStore {
    fn find_highest<'a>(&'a self, prefix: &'a str) -> StoreFuture<'a, Option<ListingRecord>> {
        Box::pin(async move {
            let records = self.lock()?;
            Ok(select_highest(records.iter(), prefix)?.cloned())
        })
    }

    fn find_exact<'a>(&'a self, property_id: &'a str) -> StoreFuture<'a, Option<ListingRecord>> {
        Box::pin(async move {
            let records = self.lock()?;
            Ok(records.iter().find(|r| r.property_id == property_id).cloned())
        })
    }

    fn insert(&self, record: ListingRecord) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let mut records = self.lock()?;
            if records.iter().any(|r| r.property_id == record.property_id) {
                return Err(StoreError::Duplicate(record.property_id));
            }
            records.push(record);
            Ok(())
        })
    }
}
