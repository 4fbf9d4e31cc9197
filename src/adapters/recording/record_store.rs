//! Recording adapter for the `RecordStore` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_typed_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ListingRecord, RecordStore, StoreFuture};

/// Records store queries and inserts while delegating to an inner store.
///
/// The resulting cassette lets an allocation be replayed against exactly the
/// answers the real collection gave, collisions included.
pub struct RecordingRecordStore<'a> {
    inner: Box<dyn RecordStore + 'a>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl<'a> RecordingRecordStore<'a> {
    /// Wraps `inner`, appending each call to `recorder`.
    pub fn new(inner: Box<dyn RecordStore + 'a>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PrefixInput<'a> {
    prefix: &'a str,
}

#[derive(Serialize)]
struct PropertyIdInput<'a> {
    property_id: &'a str,
}

impl RecordStore for RecordingRecordStore<'_> {
    fn find_highest<'b>(&'b self, prefix: &'b str) -> StoreFuture<'b, Option<ListingRecord>> {
        Box::pin(async move {
            let result = self.inner.find_highest(prefix).await;
            let input = PrefixInput { prefix };
            record_typed_result(&self.recorder, "store", "find_highest", &input, &result);
            result
        })
    }

    fn find_exact<'b>(&'b self, property_id: &'b str) -> StoreFuture<'b, Option<ListingRecord>> {
        Box::pin(async move {
            let result = self.inner.find_exact(property_id).await;
            let input = PropertyIdInput { property_id };
            record_typed_result(&self.recorder, "store", "find_exact", &input, &result);
            result
        })
    }

    fn insert(&self, record: ListingRecord) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let input = record.clone();
            let result = self.inner.insert(record).await;
            record_typed_result(&self.recorder, "store", "insert", &input, &result);
            result
        })
    }
}
