use std::fs;
use std::io;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::Path;

use crate::{FileId, LongPathsSetting, OsVersion, PlatformError};

pub(crate) fn os_version() -> Result<OsVersion, PlatformError> {
    Err(PlatformError::Unsupported("OS version query"))
}

pub(crate) fn long_paths_setting() -> LongPathsSetting {
    LongPathsSetting::NotApplicable
}

pub(crate) fn hard_link_count(path: &Path) -> io::Result<u64> {
    fs::metadata(path).map(|metadata| metadata.nlink())
}

pub(crate) fn file_id(path: &Path) -> io::Result<FileId> {
    let metadata = fs::metadata(path)?;
    Ok(FileId::new(metadata.dev(), metadata.ino()))
}

pub(crate) fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

pub(crate) fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

pub(crate) fn is_directory_symlink(path: &Path) -> io::Result<bool> {
    fs::symlink_metadata(path).map(|_| false)
}

pub(crate) fn set_owner_read_write(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

pub(crate) fn owner_can_write(path: &Path) -> io::Result<bool> {
    let mode = fs::metadata(path)?.permissions().mode();
    Ok(mode & 0o200 != 0)
}
