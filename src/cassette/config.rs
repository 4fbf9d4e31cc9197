//! Per-port cassette selection for replay.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::replayer::CassetteReplayer;

/// Port names, in the order sessions write them.
pub const PORTS: [&str; 3] = ["clock", "fs", "store"];

/// File name a session uses for a port's cassette.
#[must_use]
pub fn cassette_file_name(port: &str) -> String {
    format!("{port}.cassette.yaml")
}

/// Per-port cassette file paths. Ports without a path are not replayed and
/// panic if called.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette for the clock port.
    pub clock: Option<PathBuf>,
    /// Cassette for the filesystem port.
    pub fs: Option<PathBuf>,
    /// Cassette for the record store port.
    pub store: Option<PathBuf>,
}

/// Loaded replayers, shared by every adapter built for the same port.
pub struct PortReplayers {
    /// Replayer for the clock port.
    pub clock: Option<Arc<Mutex<CassetteReplayer>>>,
    /// Replayer for the filesystem port.
    pub fs: Option<Arc<Mutex<CassetteReplayer>>>,
    /// Replayer for the record store port.
    pub store: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl CassetteConfig {
    /// Picks up whichever per-port cassettes a recording session left in `dir`.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        let pick = |port: &str| {
            let path = dir.join(cassette_file_name(port));
            path.is_file().then_some(path)
        };
        Self { clock: pick("clock"), fs: pick("fs"), store: pick("store") }
    }

    /// Load every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: Option<&Path>| -> Result<Option<Arc<Mutex<CassetteReplayer>>>, String> {
            path.map(|p| CassetteReplayer::load(p).map(|r| Arc::new(Mutex::new(r)))).transpose()
        };
        Ok(PortReplayers {
            clock: load(self.clock.as_deref())?,
            fs: load(self.fs.as_deref())?,
            store: load(self.store.as_deref())?,
        })
    }
}
