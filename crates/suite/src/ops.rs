//! Filesystem operations exercised by the cases.
//!
//! Every operation reports failures as [`SuiteError::Filesystem`] carrying the
//! operation name and the paths involved. Operations the standard library
//! lacks (`remove` with an existence result, `relative`, `weakly_canonical`,
//! `is_empty`, link counts, equivalence) are composed here from `std::fs`,
//! `soft-canonicalize`, `filetime`, `walkdir` and the `platform` crate.

use std::env;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};

use filetime::FileTime;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::SuiteError;

const OPS_TARGET: &str = "longpath::ops";

/// Extension trait for mapping I/O results to [`SuiteError`] with path context.
pub(crate) trait IoResultExt<T> {
    /// Maps an I/O error to [`SuiteError::Filesystem`] with one path.
    fn with_path(self, operation: &'static str, path: &Path) -> Result<T, SuiteError>;

    /// Maps an I/O error to [`SuiteError::Filesystem`] with two paths.
    fn with_paths(
        self,
        operation: &'static str,
        path1: &Path,
        path2: &Path,
    ) -> Result<T, SuiteError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path(self, operation: &'static str, path: &Path) -> Result<T, SuiteError> {
        self.map_err(|error| SuiteError::filesystem(operation, path, error))
    }

    fn with_paths(
        self,
        operation: &'static str,
        path1: &Path,
        path2: &Path,
    ) -> Result<T, SuiteError> {
        self.map_err(|error| SuiteError::filesystem2(operation, path1, path2, error))
    }
}

/// Kind of filesystem object reported by [`status`] and [`symlink_status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    /// A regular file.
    Regular,
    /// A directory.
    Directory,
    /// A symbolic link (only from [`symlink_status`]).
    Symlink,
    /// Anything else: sockets, devices, fifos.
    Other,
}

impl FileKind {
    fn of(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::Regular
        } else {
            Self::Other
        }
    }
}

/// Returns the process working directory.
pub fn current_path() -> Result<PathBuf, SuiteError> {
    env::current_dir().with_path("current_path", Path::new(""))
}

/// Changes the process working directory.
pub fn set_current_path(path: impl AsRef<Path>) -> Result<(), SuiteError> {
    let path = path.as_ref();
    trace!(target: OPS_TARGET, path = %path.display(), "chdir");
    env::set_current_dir(path).with_path("current_path", path)
}

/// Creates a single directory; the parent must exist.
pub fn create_directory(path: impl AsRef<Path>) -> Result<(), SuiteError> {
    let path = path.as_ref();
    debug!(target: OPS_TARGET, path = %path.display(), "create_directory");
    fs::create_dir(path).with_path("create_directory", path)
}

/// Creates a directory and all missing parents.
pub fn create_directories(path: impl AsRef<Path>) -> Result<(), SuiteError> {
    let path = path.as_ref();
    fs::create_dir_all(path).with_path("create_directories", path)
}

/// Removes a file, symlink or empty directory.
///
/// Returns `false` when nothing existed at `path`.
pub fn remove(path: impl AsRef<Path>) -> Result<bool, SuiteError> {
    let path = path.as_ref();
    debug!(target: OPS_TARGET, path = %path.display(), "remove");
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(error) => return Err(SuiteError::filesystem("remove", path, error)),
    };

    let as_directory =
        metadata.is_dir() || platform::is_directory_symlink(path).with_path("remove", path)?;
    if as_directory {
        fs::remove_dir(path).with_path("remove", path)?;
    } else {
        fs::remove_file(path).with_path("remove", path)?;
    }
    Ok(true)
}

/// Removes `path` recursively; a missing path is not an error.
pub fn remove_all(path: impl AsRef<Path>) -> Result<(), SuiteError> {
    let path = path.as_ref();
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(SuiteError::filesystem("remove_all", path, error)),
    }
}

/// Renames `from` to `to`.
pub fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<(), SuiteError> {
    let from = from.as_ref();
    let to = to.as_ref();
    debug!(target: OPS_TARGET, from = %from.display(), to = %to.display(), "rename");
    fs::rename(from, to).with_paths("rename", from, to)
}

/// Creates a hard link named `link` to the existing file `target`.
pub fn create_hard_link(
    target: impl AsRef<Path>,
    link: impl AsRef<Path>,
) -> Result<(), SuiteError> {
    let target = target.as_ref();
    let link = link.as_ref();
    debug!(
        target: OPS_TARGET,
        target_path = %target.display(),
        link = %link.display(),
        "create_hard_link"
    );
    fs::hard_link(target, link).with_paths("create_hard_link", target, link)
}

/// Creates a file symlink named `link` storing `target` verbatim.
pub fn create_symlink(
    target: impl AsRef<Path>,
    link: impl AsRef<Path>,
) -> Result<(), SuiteError> {
    let target = target.as_ref();
    let link = link.as_ref();
    debug!(
        target: OPS_TARGET,
        target_path = %target.display(),
        link = %link.display(),
        "create_symlink"
    );
    platform::symlink_file(target, link).with_paths("create_symlink", target, link)
}

/// Creates a directory symlink named `link` storing `target` verbatim.
pub fn create_directory_symlink(
    target: impl AsRef<Path>,
    link: impl AsRef<Path>,
) -> Result<(), SuiteError> {
    let target = target.as_ref();
    let link = link.as_ref();
    debug!(
        target: OPS_TARGET,
        target_path = %target.display(),
        link = %link.display(),
        "create_directory_symlink"
    );
    platform::symlink_dir(target, link).with_paths("create_directory_symlink", target, link)
}

/// Makes `path` absolute against the working directory without touching the
/// filesystem.
pub fn absolute(path: impl AsRef<Path>) -> Result<PathBuf, SuiteError> {
    let path = path.as_ref();
    std::path::absolute(path).with_path("absolute", path)
}

/// Resolves every component of `path`, which must exist.
pub fn canonical(path: impl AsRef<Path>) -> Result<PathBuf, SuiteError> {
    let path = path.as_ref();
    fs::canonicalize(path).with_path("canonical", path)
}

/// Resolves the longest existing prefix of `path` and appends the rest.
pub fn weakly_canonical(path: impl AsRef<Path>) -> Result<PathBuf, SuiteError> {
    let path = path.as_ref();
    soft_canonicalize::soft_canonicalize(path).with_path("weakly_canonical", path)
}

/// Returns `path` relative to the working directory.
///
/// Both sides are weakly canonicalized first, so symlinks in either path do
/// not produce a wrong number of `..` components.
pub fn relative(path: impl AsRef<Path>) -> Result<PathBuf, SuiteError> {
    let path = path.as_ref();
    let cwd = current_path()?;
    let target = weakly_canonical(path)?;
    let base = weakly_canonical(&cwd)?;

    lexically_relative(&target, &base).ok_or_else(|| {
        SuiteError::filesystem2(
            "relative",
            path,
            &cwd,
            io::Error::new(io::ErrorKind::InvalidInput, "paths have different roots"),
        )
    })
}

/// Returns the lexical path from `base` to `path`.
///
/// Returns `None` when the roots differ or `base` has `..` components past
/// the common prefix. Equal paths yield `.`.
#[must_use]
pub fn lexically_relative(path: &Path, base: &Path) -> Option<PathBuf> {
    let is_root = |component: &Component<'_>| {
        matches!(component, Component::Prefix(_) | Component::RootDir)
    };
    let path_components: Vec<Component<'_>> = path
        .components()
        .filter(|component| *component != Component::CurDir)
        .collect();
    let base_components: Vec<Component<'_>> = base
        .components()
        .filter(|component| *component != Component::CurDir)
        .collect();

    let path_roots = path_components.iter().take_while(|c| is_root(c));
    let base_roots = base_components.iter().take_while(|c| is_root(c));
    if !path_roots.eq(base_roots) {
        return None;
    }

    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(left, right)| left == right)
        .count();

    let mut relative = PathBuf::new();
    for component in &base_components[common..] {
        if *component == Component::ParentDir {
            return None;
        }
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

/// Copies the file `from` to the new file `to`, returning the bytes copied.
pub fn copy_file(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<u64, SuiteError> {
    let from = from.as_ref();
    let to = to.as_ref();
    debug!(target: OPS_TARGET, from = %from.display(), to = %to.display(), "copy_file");
    if fs::symlink_metadata(to).is_ok() {
        return Err(SuiteError::filesystem2(
            "copy_file",
            from,
            to,
            io::Error::new(io::ErrorKind::AlreadyExists, "destination exists"),
        ));
    }
    fs::copy(from, to).with_paths("copy_file", from, to)
}

/// Reports whether a directory has no entries or a file has no content.
pub fn is_empty(path: impl AsRef<Path>) -> Result<bool, SuiteError> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).with_path("is_empty", path)?;
    if metadata.is_dir() {
        let mut entries = fs::read_dir(path).with_path("is_empty", path)?;
        Ok(entries.next().is_none())
    } else {
        Ok(metadata.len() == 0)
    }
}

/// Returns the size of the regular file at `path`.
pub fn file_size(path: impl AsRef<Path>) -> Result<u64, SuiteError> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).with_path("file_size", path)?;
    if !metadata.is_file() {
        return Err(SuiteError::filesystem(
            "file_size",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    Ok(metadata.len())
}

/// Truncates or extends the file at `path` to `len` bytes.
pub fn resize_file(path: impl AsRef<Path>, len: u64) -> Result<(), SuiteError> {
    let path = path.as_ref();
    debug!(target: OPS_TARGET, path = %path.display(), len, "resize_file");
    let file = OpenOptions::new()
        .write(true)
        .open(path)
        .with_path("resize_file", path)?;
    file.set_len(len).with_path("resize_file", path)
}

/// Returns the modification time of `path`.
pub fn last_write_time(path: impl AsRef<Path>) -> Result<FileTime, SuiteError> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).with_path("last_write_time", path)?;
    Ok(FileTime::from_last_modification_time(&metadata))
}

/// Sets the modification time of `path`.
pub fn set_last_write_time(path: impl AsRef<Path>, time: FileTime) -> Result<(), SuiteError> {
    let path = path.as_ref();
    filetime::set_file_mtime(path, time).with_path("last_write_time", path)
}

/// Grants the owner read and write access to `path`.
pub fn set_owner_read_write(path: impl AsRef<Path>) -> Result<(), SuiteError> {
    let path = path.as_ref();
    platform::set_owner_read_write(path).with_path("permissions", path)
}

/// Reports whether the owner may write to `path`.
pub fn owner_can_write(path: impl AsRef<Path>) -> Result<bool, SuiteError> {
    let path = path.as_ref();
    platform::owner_can_write(path).with_path("status", path)
}

/// Returns the kind of object at `path`, following symlinks.
pub fn status(path: impl AsRef<Path>) -> Result<FileKind, SuiteError> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).with_path("status", path)?;
    Ok(FileKind::of(metadata.file_type()))
}

/// Returns the kind of object at `path` without following a final symlink.
pub fn symlink_status(path: impl AsRef<Path>) -> Result<FileKind, SuiteError> {
    let path = path.as_ref();
    let metadata = fs::symlink_metadata(path).with_path("symlink_status", path)?;
    Ok(FileKind::of(metadata.file_type()))
}

/// Returns the target stored in the symlink at `path`.
pub fn read_symlink(path: impl AsRef<Path>) -> Result<PathBuf, SuiteError> {
    let path = path.as_ref();
    fs::read_link(path).with_path("read_symlink", path)
}

/// Returns the number of hard links to the file at `path`.
pub fn hard_link_count(path: impl AsRef<Path>) -> Result<u64, SuiteError> {
    let path = path.as_ref();
    platform::hard_link_count(path).with_path("hard_link_count", path)
}

/// Reports whether both paths resolve to the same filesystem object.
pub fn equivalent(left: impl AsRef<Path>, right: impl AsRef<Path>) -> Result<bool, SuiteError> {
    let left = left.as_ref();
    let right = right.as_ref();
    let left_id = platform::file_id(left).with_paths("equivalent", left, right)?;
    let right_id = platform::file_id(right).with_paths("equivalent", left, right)?;
    Ok(left_id == right_id)
}

/// Lists the kinds of the direct entries of the directory at `path`.
pub fn directory_entries(path: impl AsRef<Path>) -> Result<Vec<FileKind>, SuiteError> {
    let path = path.as_ref();
    let mut kinds = Vec::new();
    for entry in fs::read_dir(path).with_path("directory_iterator", path)? {
        let entry = entry.with_path("directory_iterator", path)?;
        let file_type = entry
            .file_type()
            .with_path("directory_iterator", &entry.path())?;
        kinds.push(FileKind::of(file_type));
    }
    Ok(kinds)
}

/// Lists the kinds of every entry below `path`, excluding `path` itself.
pub fn recursive_entries(path: impl AsRef<Path>) -> Result<Vec<FileKind>, SuiteError> {
    let path = path.as_ref();
    let mut kinds = Vec::new();
    for entry in WalkDir::new(path).min_depth(1) {
        let entry = entry.map_err(|error| {
            let failed = error.path().unwrap_or(path).to_path_buf();
            let source = io::Error::from(error);
            SuiteError::filesystem("recursive_directory_iterator", &failed, source)
        })?;
        kinds.push(FileKind::of(entry.file_type()));
    }
    Ok(kinds)
}
