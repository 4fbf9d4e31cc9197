//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::{LiveClock, LiveFileSystem};
use crate::adapters::recording::{RecordingClock, RecordingFileSystem, RecordingRecordStore};
use crate::adapters::replaying::{ReplayingClock, ReplayingFileSystem, ReplayingRecordStore};
use crate::allocator::{AllocatorSettings, IdentifierAllocator};
use crate::cassette::config::CassetteConfig;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::{Clock, FileSystem, RecordStore};
use crate::store::FileRecordStore;

/// Bundles the ports a command needs.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying). Record stores are opened per collection with
/// [`record_store`](Self::record_store).
pub struct ServiceContext {
    /// Clock for timestamps and the allocator's fallback.
    pub clock: Box<dyn Clock>,
    /// Filesystem holding the collection files.
    pub fs: Arc<dyn FileSystem>,
    /// Allocator tuning.
    pub allocator_settings: AllocatorSettings,
    store_root: PathBuf,
    store_replayer: Option<Arc<Mutex<CassetteReplayer>>>,
    store_recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context over the store rooted at `store_root`.
    #[must_use]
    pub fn live(store_root: &Path, allocator_settings: AllocatorSettings) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Arc::new(LiveFileSystem),
            allocator_settings,
            store_root: store_root.to_path_buf(),
            store_replayer: None,
            store_recorder: None,
        }
    }

    /// Creates a live context that records every port interaction into
    /// per-port cassettes under `output_dir`.
    ///
    /// The context must be dropped before [`RecordingSession::finish`] is
    /// called.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created.
    pub fn recording_at(
        output_dir: &Path,
        store_root: &Path,
        allocator_settings: AllocatorSettings,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(output_dir, store_root)?;
        let ctx = Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock))),
            fs: Arc::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.fs))),
            allocator_settings,
            store_root: store_root.to_path_buf(),
            store_replayer: None,
            store_recorder: Some(Arc::clone(&session.store)),
        };
        Ok((ctx, session))
    }

    /// Creates a context whose ports are served from cassettes.
    ///
    /// Ports without a configured cassette panic with a clear message when
    /// called. Without a store cassette, record stores fall back to reading
    /// collection files through the (replayed) filesystem port.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette cannot be read or parsed.
    pub fn replaying_from(
        config: &CassetteConfig,
        store_root: &Path,
        allocator_settings: AllocatorSettings,
    ) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(ReplayingClock::unconfigured()),
            },
            fs: match replayers.fs {
                Some(r) => Arc::new(ReplayingFileSystem::new(r)),
                None => Arc::new(ReplayingFileSystem::unconfigured()),
            },
            allocator_settings,
            store_root: store_root.to_path_buf(),
            store_replayer: replayers.store,
            store_recorder: None,
        })
    }

    /// Root directory of the collection files.
    #[must_use]
    pub fn store_root(&self) -> &Path {
        &self.store_root
    }

    /// Opens the record store for `collection`.
    #[must_use]
    pub fn record_store(&self, collection: &str) -> Box<dyn RecordStore + '_> {
        let store: Box<dyn RecordStore + '_> = match &self.store_replayer {
            Some(replayer) => Box::new(ReplayingRecordStore::new(Arc::clone(replayer))),
            None => Box::new(FileRecordStore::new(Arc::clone(&self.fs), &self.store_root, collection)),
        };
        match &self.store_recorder {
            Some(recorder) => Box::new(RecordingRecordStore::new(store, Arc::clone(recorder))),
            None => store,
        }
    }

    /// Builds an allocator over `store` using this context's clock and
    /// settings.
    #[must_use]
    pub fn allocator<'a>(&'a self, store: &'a dyn RecordStore) -> IdentifierAllocator<'a> {
        IdentifierAllocator::new(store, self.clock.as_ref(), self.allocator_settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::IdScheme;
    use crate::cassette::config::cassette_file_name;
    use serde_json::json;

    #[tokio::test]
    async fn live_context_allocates_against_collection_files() {
        let root = std::env::temp_dir().join("listing_id_ctx_live");
        let _ = std::fs::remove_dir_all(&root);

        let ctx = ServiceContext::live(&root, AllocatorSettings::default());
        let store = ctx.record_store("commercial_lease");
        let id = ctx.allocator(store.as_ref()).allocate(&IdScheme::new("RA-COMLECS").unwrap()).await;
        assert_eq!(id, "RA-COMLECS0001");

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn replaying_context_serves_store_from_cassette() {
        let dir = std::env::temp_dir().join("listing_id_ctx_replay");
        let _ = std::fs::remove_dir_all(&dir);

        let mut rec = CassetteRecorder::new(dir.join(cassette_file_name("store")), "store", "/srv");
        rec.record("store", "find_highest", json!({"prefix": "P"}), json!({"Ok": null}));
        rec.record("store", "find_exact", json!({"property_id": "P0001"}), json!({"Ok": null}));
        rec.finish().unwrap();

        let ctx = ServiceContext::replaying_from(
            &CassetteConfig::from_dir(&dir),
            Path::new("/srv"),
            AllocatorSettings::default(),
        )
        .unwrap();
        let store = ctx.record_store("anything");
        let id = ctx.allocator(store.as_ref()).allocate(&IdScheme::new("P").unwrap()).await;
        assert_eq!(id, "P0001");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let ctx = ServiceContext::replaying_from(
            &CassetteConfig::default(),
            Path::new("/srv"),
            AllocatorSettings::default(),
        )
        .unwrap();
        let _ = ctx.clock.now();
    }
}
