#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `platform` answers the host-specific questions the long-path conformance
//! suite needs but the standard library cannot: which OS build is running,
//! whether the `LongPathsEnabled` opt-in is set, how many hard links a file
//! has, and whether two paths name the same file. It also hides the
//! per-platform spelling of symlink creation and owner permission changes.
//!
//! # Design
//!
//! All `unsafe` FFI lives in the private `windows` module and is confined to
//! calls into `windows-sys`. The Unix implementation uses only the standard
//! library's `os::unix` extensions. Callers see plain Rust types:
//!
//! - [`OsVersion`] from [`os_version`].
//! - [`LongPathsSetting`] from [`long_paths_setting`].
//! - [`FileId`] from [`file_id`], compared for path equivalence.
//!
//! # Errors
//!
//! Queries that have no meaning on the current host return
//! [`PlatformError::Unsupported`]. Filesystem queries return [`std::io::Error`]
//! so callers can attach their own path context.

use std::fmt;
use std::io;
use std::path::Path;

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
use unix as imp;
#[cfg(windows)]
use windows as imp;

/// Registry key holding the long-path opt-in, relative to `HKEY_LOCAL_MACHINE`.
pub const FILESYSTEM_KEY: &str = r"SYSTEM\CurrentControlSet\Control\FileSystem";

/// Registry value that enables long-path support when set to `1`.
pub const LONG_PATHS_VALUE: &str = "LongPathsEnabled";

/// Errors produced by host capability queries.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The query does not apply to the current host.
    #[error("{0} is not available on this platform")]
    Unsupported(&'static str),

    /// A native call reported a failure status.
    #[error("{call} failed with status {code:#x}")]
    Native {
        /// Name of the failing call.
        call: &'static str,
        /// Raw status or error code returned by the call.
        code: u32,
    },
}

/// Operating system version triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct OsVersion {
    /// Major version number.
    pub major: u32,
    /// Minor version number.
    pub minor: u32,
    /// Build number.
    pub build: u32,
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

/// State of the host's long-path opt-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LongPathsSetting {
    /// The value exists and equals `1`.
    Enabled,
    /// The value exists with a different DWORD.
    Disabled(u32),
    /// The value exists but is not a DWORD.
    WrongType(u32),
    /// The `FileSystem` key does not exist.
    KeyMissing,
    /// The key exists but has no `LongPathsEnabled` value.
    ValueMissing,
    /// Opening the key or reading the value failed with the given error code.
    Unreadable(u32),
    /// The host has no legacy path limit to opt out of.
    NotApplicable,
}

/// Identity of a filesystem object, stable across the paths that reach it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileId {
    volume: u64,
    index: u64,
}

impl FileId {
    pub(crate) const fn new(volume: u64, index: u64) -> Self {
        Self { volume, index }
    }
}

/// Returns the running OS version.
///
/// Only Windows reports a version; other hosts return
/// [`PlatformError::Unsupported`].
pub fn os_version() -> Result<OsVersion, PlatformError> {
    imp::os_version()
}

/// Reads the long-path opt-in from the registry without modifying it.
#[must_use]
pub fn long_paths_setting() -> LongPathsSetting {
    imp::long_paths_setting()
}

/// Returns the number of hard links to the file at `path`, following symlinks.
pub fn hard_link_count(path: &Path) -> io::Result<u64> {
    imp::hard_link_count(path)
}

/// Returns the identity of the file at `path`, following symlinks.
pub fn file_id(path: &Path) -> io::Result<FileId> {
    imp::file_id(path)
}

/// Creates a symbolic link at `link` pointing to the file `target`.
///
/// `target` is stored verbatim; relative targets resolve against the link's
/// parent directory when followed.
pub fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    imp::symlink_file(target, link)
}

/// Creates a symbolic link at `link` pointing to the directory `target`.
pub fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    imp::symlink_dir(target, link)
}

/// Reports whether `path` is a symlink that must be removed as a directory.
///
/// Windows directory symlinks are directory entries; on Unix every symlink is
/// removed with `unlink`.
pub fn is_directory_symlink(path: &Path) -> io::Result<bool> {
    imp::is_directory_symlink(path)
}

/// Grants the owner read and write access and removes everything else.
pub fn set_owner_read_write(path: &Path) -> io::Result<()> {
    imp::set_owner_read_write(path)
}

/// Reports whether the owner can write to `path`.
pub fn owner_can_write(path: &Path) -> io::Result<bool> {
    imp::owner_can_write(path)
}
