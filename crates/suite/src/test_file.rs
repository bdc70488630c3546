//! Scoped dummy files used by the cases.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::SuiteError;

/// Payload written into every test file.
pub const DUMMY_CONTENT: &[u8] = b"foobarbaz";

/// A file created with [`DUMMY_CONTENT`] whose handle stays open until the
/// guard is dropped.
///
/// The file itself is not deleted on drop; the per-case directories are
/// recreated for every case.
#[derive(Debug)]
pub struct TestFile {
    _handle: File,
}

impl TestFile {
    /// Creates (or truncates) `path` and writes the dummy payload.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let path = path.as_ref();
        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|error| SuiteError::filesystem("create_test_file", path, error))?;

        handle
            .write_all(DUMMY_CONTENT)
            .map_err(|error| SuiteError::filesystem("write_test_file", path, error))?;

        Ok(Self { _handle: handle })
    }
}
