//! Record stores: persistence for listing collections.
//!
//! Each collection lives in its own YAML file under the store root and all
//! file I/O goes through the `FileSystem` port. Directory layout:
//!
//! ```text
//! <root>/
//!   ├── commercial_lease.yaml
//!   ├── commercial_sell.yaml
//!   └── residential_rent.yaml
//! ```

mod memory;

pub use memory::MemoryRecordStore;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ports::record_store::select_highest;
use crate::ports::{FileSystem, ListingRecord, RecordStore, StoreError, StoreFuture};

/// On-disk shape of a collection file.
#[derive(Debug, Serialize, Deserialize)]
struct CollectionFile {
    collection: String,
    #[serde(default)]
    records: Vec<ListingRecord>,
}

/// Record store backed by one YAML file per collection.
///
/// Every query re-reads the file, so records written by another process
/// are visible to the next allocation. Port calls run on tokio's blocking
/// pool, which keeps a stalled read from holding up the allocator's
/// per-query timeout.
pub struct FileRecordStore {
    fs: Arc<dyn FileSystem>,
    collection: String,
    path: PathBuf,
}

impl FileRecordStore {
    /// Opens the collection stored at `<root>/<collection>.yaml`.
    #[must_use]
    pub fn new(fs: Arc<dyn FileSystem>, root: &Path, collection: &str) -> Self {
        Self {
            fs,
            collection: collection.to_string(),
            path: root.join(format!("{collection}.yaml")),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record in the collection on the calling thread. A missing
    /// file is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Vec<ListingRecord>, StoreError> {
        read_collection(self.fs.as_ref(), &self.path)
    }

    /// Runs `op` against the filesystem port on the blocking pool.
    async fn off_thread<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn FileSystem, &Path, &str) -> Result<T, StoreError> + Send + 'static,
    {
        let fs = Arc::clone(&self.fs);
        let path = self.path.clone();
        let collection = self.collection.clone();
        tokio::task::spawn_blocking(move || op(fs.as_ref(), &path, &collection))
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.path.display())))?
    }
}

fn read_collection(fs: &dyn FileSystem, path: &Path) -> Result<Vec<ListingRecord>, StoreError> {
    let contents =
        fs.read_optional(path).map_err(|e| StoreError::Io(format!("{}: {e}", path.display())))?;
    let Some(contents) = contents.filter(|c| !c.trim().is_empty()) else {
        return Ok(Vec::new());
    };
    let file: CollectionFile = serde_yaml::from_str(&contents)
        .map_err(|e| StoreError::Malformed(format!("{}: {e}", path.display())))?;
    Ok(file.records)
}

fn write_collection(
    fs: &dyn FileSystem,
    path: &Path,
    collection: &str,
    records: Vec<ListingRecord>,
) -> Result<(), StoreError> {
    let file = CollectionFile { collection: collection.to_string(), records };
    let yaml = serde_yaml::to_string(&file)
        .map_err(|e| StoreError::Malformed(format!("{collection}: {e}")))?;
    fs.replace(path, &yaml).map_err(|e| StoreError::Io(format!("{}: {e}", path.display())))
}

impl RecordStore for FileRecordStore {
    fn find_highest<'a>(&'a self, prefix: &'a str) -> StoreFuture<'a, Option<ListingRecord>> {
        let prefix = prefix.to_string();
        Box::pin(self.off_thread(move |fs, path, _| {
            let records = read_collection(fs, path)?;
            Ok(select_highest(&records, &prefix)?.cloned())
        }))
    }

    fn find_exact<'a>(&'a self, property_id: &'a str) -> StoreFuture<'a, Option<ListingRecord>> {
        let property_id = property_id.to_string();
        Box::pin(self.off_thread(move |fs, path, _| {
            Ok(read_collection(fs, path)?.into_iter().find(|r| r.property_id == property_id))
        }))
    }

    fn insert(&self, record: ListingRecord) -> StoreFuture<'_, ()> {
        Box::pin(self.off_thread(move |fs, path, collection| {
            let mut records = read_collection(fs, path)?;
            if records.iter().any(|r| r.property_id == record.property_id) {
                return Err(StoreError::Duplicate(record.property_id));
            }
            records.push(record);
            write_collection(fs, path, collection, records)
        }))
    }
}
