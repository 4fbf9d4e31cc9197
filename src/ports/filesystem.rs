//! Filesystem port for collection file I/O.

use std::path::Path;

/// Result type shared by all filesystem port methods.
pub type FsResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Reads and replaces whole collection files.
///
/// Collections are small YAML documents that are always rewritten in full,
/// so the port only needs whole-file reads and whole-file replacement.
pub trait FileSystem: Send + Sync {
    /// Reads a file as UTF-8. Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn read_optional(&self, path: &Path) -> FsResult<Option<String>>;

    /// Replaces the file at `path` with `contents`, creating parent
    /// directories as needed. Readers never observe a partially written file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the final rename fails.
    fn replace(&self, path: &Path, contents: &str) -> FsResult<()>;
}
