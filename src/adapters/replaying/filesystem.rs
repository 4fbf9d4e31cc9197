//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{FileSystem, FsResult};

/// Serves recorded collection file reads and write outcomes.
pub struct ReplayingFileSystem {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingFileSystem {
    /// Creates a replaying filesystem backed by `replayer`.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Creates a replaying filesystem with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_optional(&self, _path: &Path) -> FsResult<Option<String>> {
        let output = next_output(self.replayer.as_deref(), "fs", "read_optional");
        replay_result(output, "fs::read_optional").map_err(Into::into)
    }

    fn replace(&self, _path: &Path, _contents: &str) -> FsResult<()> {
        let output = next_output(self.replayer.as_deref(), "fs", "replace");
        replay_result(output, "fs::replace").map_err(Into::into)
    }
}
