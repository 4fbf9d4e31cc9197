//! Replaying adapter for the `RecordStore` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{ListingRecord, RecordStore, StoreError, StoreFuture};

/// Serves recorded store answers.
///
/// Recorded errors come back as the variant that was recorded. Errors
/// recorded as a bare message replay as [`StoreError::Unavailable`].
pub struct ReplayingRecordStore {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingRecordStore {
    /// Creates a replaying store backed by `replayer`.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Creates a replaying store with no cassette. Panics when queried.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }

    fn replay<T: serde::de::DeserializeOwned>(&self, method: &str) -> Result<T, StoreError> {
        let output = next_output(self.replayer.as_deref(), "store", method);
        if let Some(err) = output.get("Err") {
            return Err(serde_json::from_value(err.clone()).unwrap_or_else(|_| {
                StoreError::Unavailable(err.as_str().unwrap_or("unknown error").to_string())
            }));
        }
        replay_result(output, method).map_err(StoreError::Unavailable)
    }
}

impl RecordStore for ReplayingRecordStore {
    fn find_highest<'a>(&'a self, _prefix: &'a str) -> StoreFuture<'a, Option<ListingRecord>> {
        let result = self.replay("find_highest");
        Box::pin(async move { result })
    }

    fn find_exact<'a>(&'a self, _property_id: &'a str) -> StoreFuture<'a, Option<ListingRecord>> {
        let result = self.replay("find_exact");
        Box::pin(async move { result })
    }

    fn insert(&self, _record: ListingRecord) -> StoreFuture<'_, ()> {
        let result = self.replay("insert");
        Box::pin(async move { result })
    }
}
