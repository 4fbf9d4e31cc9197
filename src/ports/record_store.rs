//! Record store port over a single listing collection.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed future type alias used by [`RecordStore`] to keep the trait dyn-compatible.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// A persisted listing, keyed by its human-readable property identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Allocated identifier, e.g. `RA-COMLECS0042`.
    pub property_id: String,
    /// Key of the listing family the record belongs to.
    pub family: String,
    /// When the record was first persisted.
    pub created_at: DateTime<Utc>,
    /// Opaque listing payload.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

/// Failures raised by a record store.
///
/// Serializes externally tagged (`{"Duplicate": "P0001"}`) so cassettes keep
/// the variant.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum StoreError {
    /// The backing store could not be reached or refused the query.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    /// Stored data could not be decoded.
    #[error("malformed collection data: {0}")]
    Malformed(String),
    /// An insert targeted an identifier that already exists.
    #[error("duplicate property id: {0}")]
    Duplicate(String),
    /// Reading or writing the backing file failed.
    #[error("collection I/O failed: {0}")]
    Io(String),
}

/// Query and persist capability over one listing collection.
///
/// The allocator only ever calls [`find_highest`](Self::find_highest) and
/// [`find_exact`](Self::find_exact). [`insert`](Self::insert) belongs to the
/// record-creation path that runs after allocation.
pub trait RecordStore: Send + Sync {
    /// Returns the record whose identifier matches `^prefix[0-9]+$` and ranks
    /// highest, or `None` if no identifier carries the prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be queried.
    fn find_highest<'a>(&'a self, prefix: &'a str) -> StoreFuture<'a, Option<ListingRecord>>;

    /// Returns the record with exactly this identifier, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be queried.
    fn find_exact<'a>(&'a self, property_id: &'a str) -> StoreFuture<'a, Option<ListingRecord>>;

    /// Persists a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] when the identifier is taken, or
    /// another variant if the collection cannot be written.
    fn insert(&self, record: ListingRecord) -> StoreFuture<'_, ()>;
}

/// Compiles the `^prefix[0-9]+$` matcher for a prefix.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] if the escaped prefix does not compile.
pub fn prefix_pattern(prefix: &str) -> Result<Regex, StoreError> {
    Regex::new(&format!("^{}[0-9]+$", regex::escape(prefix)))
        .map_err(|e| StoreError::Malformed(format!("prefix {prefix:?}: {e}")))
}

/// Orders two identifiers sharing a prefix by their numeric suffix, falling
/// back to plain string order on ties (`P0010` vs `P010`).
///
/// Unlike a lexical sort this ranks `P10000` above `P9999`.
#[must_use]
pub fn compare_sequence(prefix: &str, a: &str, b: &str) -> Ordering {
    let digits = |id: &'_ str| -> String {
        let suffix = id.strip_prefix(prefix).unwrap_or(id);
        suffix.trim_start_matches('0').to_string()
    };
    let (da, db) = (digits(a), digits(b));
    da.len().cmp(&db.len()).then_with(|| da.cmp(&db)).then_with(|| a.cmp(b))
}

/// Selects the highest-ranked record for `prefix` from a collection snapshot.
///
/// # Errors
///
/// Returns an error if the prefix matcher cannot be compiled.
pub fn select_highest<'r, I>(records: I, prefix: &str) -> Result<Option<&'r ListingRecord>, StoreError>
where
    I: IntoIterator<Item = &'r ListingRecord>,
{
    let pattern = prefix_pattern(prefix)?;
    Ok(records
        .into_iter()
        .filter(|r| pattern.is_match(&r.property_id))
        .max_by(|a, b| compare_sequence(prefix, &a.property_id, &b.property_id)))
}
