//! Sequential prefixed identifier allocation.
//!
//! The next identifier for a prefix is derived from the highest identifier
//! already stored under that prefix. There is no counter record, so two
//! allocations racing on the same prefix can produce the same candidate; the
//! caller's later insert is the only place that would notice.
//!
//! ```text
//! find_highest ─► n = k + 1 ─► find_exact(P+n) ─free─► P+n
//!                                   │taken
//!                                   ▼
//!                           find_exact(P+n+1) ─free─► P+n+1
//!                                   │taken
//!                                   ▼
//!                        restart (up to max_attempts) ─► fallback P+<8 ms digits>
//! ```

pub mod scheme;

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::ports::{Clock, RecordStore, StoreError, StoreFuture};

pub use scheme::{trailing_sequence, IdScheme, SchemeError};

/// Modulus keeping the last eight digits of a millisecond timestamp.
const FALLBACK_MODULUS: i64 = 100_000_000;

/// Tuning knobs for [`IdentifierAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorSettings {
    /// Upper bound on each individual store query.
    pub store_timeout: Duration,
    /// Full allocation passes tried before giving up on collisions.
    pub max_attempts: u32,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self { store_timeout: Duration::from_millis(2000), max_attempts: 5 }
    }
}

/// Why an allocation had to leave the sequential path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// A store query returned an error.
    #[error("{operation} failed: {source}")]
    Store {
        /// Store method that failed.
        operation: &'static str,
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
    /// A store query did not complete in time.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// Store method that timed out.
        operation: &'static str,
        /// Configured limit.
        after: Duration,
    },
    /// The highest stored identifier has a sequence that cannot be incremented.
    #[error("cannot derive a sequence from {0:?}")]
    MalformedIdentifier(String),
    /// Every candidate collided for the configured number of passes.
    #[error("identifiers for {prefix:?} kept colliding after {attempts} attempts")]
    CollisionExhausted {
        /// Prefix being allocated.
        prefix: String,
        /// Passes made.
        attempts: u32,
    },
}

/// Allocates identifiers against one record collection.
///
/// The allocator only reads from the store. It borrows its ports so a single
/// service context can serve many allocations.
pub struct IdentifierAllocator<'a> {
    store: &'a dyn RecordStore,
    clock: &'a dyn Clock,
    settings: AllocatorSettings,
}

impl<'a> IdentifierAllocator<'a> {
    /// Creates an allocator over the given store and clock.
    #[must_use]
    pub fn new(store: &'a dyn RecordStore, clock: &'a dyn Clock, settings: AllocatorSettings) -> Self {
        Self { store, clock, settings }
    }

    /// Returns an identifier for a new record under `scheme`.
    ///
    /// Never fails. Store errors, timeouts, and exhausted collision retries
    /// are logged and answered with [`fallback`](Self::fallback).
    pub async fn allocate(&self, scheme: &IdScheme) -> String {
        match self.try_allocate(scheme).await {
            Ok(id) => id,
            Err(err) => {
                let id = self.fallback(scheme);
                match &err {
                    AllocationError::CollisionExhausted { .. } => {
                        warn!(prefix = scheme.prefix(), fallback = %id, "{err}");
                    }
                    _ => error!(prefix = scheme.prefix(), fallback = %id, "{err}"),
                }
                id
            }
        }
    }

    /// Runs the sequential allocation path without the timestamp fallback.
    ///
    /// # Errors
    ///
    /// Returns the reason the sequential path could not produce an identifier.
    pub async fn try_allocate(&self, scheme: &IdScheme) -> Result<String, AllocationError> {
        let prefix = scheme.prefix();
        let attempts = self.settings.max_attempts.max(1);

        for attempt in 1..=attempts {
            let next = self.next_sequence(prefix).await?;

            let candidate = scheme.format(next);
            if self.is_free(&candidate).await? {
                debug!(prefix, candidate = %candidate, attempt, "allocated");
                return Ok(candidate);
            }

            let Some(bumped) = next.checked_add(1) else {
                return Err(AllocationError::MalformedIdentifier(candidate));
            };
            let retry = scheme.format(bumped);
            warn!(prefix, taken = %candidate, retry = %retry, attempt, "identifier collision");
            if self.is_free(&retry).await? {
                debug!(prefix, candidate = %retry, attempt, "allocated after collision");
                return Ok(retry);
            }

            warn!(prefix, taken = %retry, attempt, "second collision, restarting allocation");
        }

        Err(AllocationError::CollisionExhausted { prefix: prefix.to_string(), attempts })
    }

    /// Builds the last-resort identifier: the prefix followed by the last
    /// eight digits of the current Unix time in milliseconds.
    #[must_use]
    pub fn fallback(&self, scheme: &IdScheme) -> String {
        let millis = self.clock.now().timestamp_millis().rem_euclid(FALLBACK_MODULUS);
        format!("{}{millis:08}", scheme.prefix())
    }

    async fn next_sequence(&self, prefix: &str) -> Result<u64, AllocationError> {
        let highest = self.query("find_highest", self.store.find_highest(prefix)).await?;
        let Some(record) = highest else {
            return Ok(1);
        };
        match trailing_sequence(&record.property_id) {
            Ok(Some(k)) => k
                .checked_add(1)
                .ok_or(AllocationError::MalformedIdentifier(record.property_id)),
            Ok(None) => Ok(1),
            Err(_) => Err(AllocationError::MalformedIdentifier(record.property_id)),
        }
    }

    async fn is_free(&self, property_id: &str) -> Result<bool, AllocationError> {
        let existing = self.query("find_exact", self.store.find_exact(property_id)).await?;
        Ok(existing.is_none())
    }

    async fn query<T>(
        &self,
        operation: &'static str,
        call: StoreFuture<'_, T>,
    ) -> Result<T, AllocationError> {
        match tokio::time::timeout(self.settings.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(AllocationError::Store { operation, source }),
            Err(_) => Err(AllocationError::Timeout { operation, after: self.settings.store_timeout }),
        }
    }
}
