//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{FileSystem, FsResult};

/// Records collection file reads and writes while delegating to an inner
/// filesystem.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Wraps `inner`, appending each call to `recorder`.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

#[derive(Serialize)]
struct ReplaceInput<'a> {
    path: String,
    contents: &'a str,
}

impl FileSystem for RecordingFileSystem {
    fn read_optional(&self, path: &Path) -> FsResult<Option<String>> {
        let result = self.inner.read_optional(path);
        let input = PathInput { path: path.display().to_string() };
        record_result(&self.recorder, "fs", "read_optional", &input, &result);
        result
    }

    fn replace(&self, path: &Path, contents: &str) -> FsResult<()> {
        let result = self.inner.replace(path, contents);
        let input = ReplaceInput { path: path.display().to_string(), contents };
        record_result(&self.recorder, "fs", "replace", &input, &result);
        result
    }
}
