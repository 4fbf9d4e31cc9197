//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the allocator core and an
//! external system (time, disk, the record collection). Implementations
//! live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod record_store;

pub use clock::Clock;
pub use filesystem::{FileSystem, FsResult};
pub use record_store::{ListingRecord, RecordStore, StoreError, StoreFuture};
