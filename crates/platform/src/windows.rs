use std::fs::{self, OpenOptions};
use std::io;
use std::iter;
use std::mem;
use std::os::windows::fs::{FileTypeExt, OpenOptionsExt};
use std::os::windows::io::AsRawHandle;
use std::path::Path;
use std::ptr;

use windows_sys::Wdk::System::SystemServices::RtlGetVersion;
use windows_sys::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS};
use windows_sys::Win32::Storage::FileSystem::{
    BY_HANDLE_FILE_INFORMATION, FILE_FLAG_BACKUP_SEMANTICS, FILE_READ_ATTRIBUTES,
    GetFileInformationByHandle,
};
use windows_sys::Win32::System::Registry::{
    HKEY, HKEY_LOCAL_MACHINE, KEY_READ, REG_DWORD, REG_VALUE_TYPE, RegCloseKey, RegOpenKeyExW,
    RegQueryValueExW,
};
use windows_sys::Win32::System::SystemInformation::OSVERSIONINFOW;

use crate::{FILESYSTEM_KEY, FileId, LONG_PATHS_VALUE, LongPathsSetting, OsVersion, PlatformError};

pub(crate) fn os_version() -> Result<OsVersion, PlatformError> {
    // SAFETY: OSVERSIONINFOW is plain old data; all-zero is a valid value.
    let mut info: OSVERSIONINFOW = unsafe { mem::zeroed() };
    info.dwOSVersionInfoSize = mem::size_of::<OSVERSIONINFOW>() as u32;

    // SAFETY: `info` is a live, correctly sized OSVERSIONINFOW.
    let status = unsafe { RtlGetVersion(&mut info) };
    if status != 0 {
        return Err(PlatformError::Native {
            call: "RtlGetVersion",
            code: status as u32,
        });
    }

    Ok(OsVersion {
        major: info.dwMajorVersion,
        minor: info.dwMinorVersion,
        build: info.dwBuildNumber,
    })
}

/// Open registry key, closed on drop.
struct RegistryKey(HKEY);

impl Drop for RegistryKey {
    fn drop(&mut self) {
        // SAFETY: the handle came from a successful RegOpenKeyExW and is
        // closed exactly once.
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

fn wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(iter::once(0)).collect()
}

pub(crate) fn long_paths_setting() -> LongPathsSetting {
    let subkey = wide(FILESYSTEM_KEY);
    let mut raw: HKEY = ptr::null_mut();

    // SAFETY: `subkey` is NUL-terminated and `raw` is a valid out pointer.
    let status = unsafe { RegOpenKeyExW(HKEY_LOCAL_MACHINE, subkey.as_ptr(), 0, KEY_READ, &mut raw) };
    match status {
        ERROR_SUCCESS => {}
        ERROR_FILE_NOT_FOUND => return LongPathsSetting::KeyMissing,
        other => return LongPathsSetting::Unreadable(other),
    }
    let key = RegistryKey(raw);

    let value_name = wide(LONG_PATHS_VALUE);
    let mut value_type: REG_VALUE_TYPE = 0;
    let mut data: u32 = 0;
    let mut size = mem::size_of::<u32>() as u32;

    // SAFETY: `data` provides `size` writable bytes and every pointer is live
    // for the duration of the call.
    let status = unsafe {
        RegQueryValueExW(
            key.0,
            value_name.as_ptr(),
            ptr::null(),
            &mut value_type,
            ptr::from_mut(&mut data).cast::<u8>(),
            &mut size,
        )
    };
    match status {
        ERROR_SUCCESS if value_type != REG_DWORD => LongPathsSetting::WrongType(value_type),
        ERROR_SUCCESS if data == 1 => LongPathsSetting::Enabled,
        ERROR_SUCCESS => LongPathsSetting::Disabled(data),
        ERROR_FILE_NOT_FOUND => LongPathsSetting::ValueMissing,
        other => LongPathsSetting::Unreadable(other),
    }
}

fn file_information(path: &Path) -> io::Result<BY_HANDLE_FILE_INFORMATION> {
    // Backup semantics lets the same query open directories.
    let file = OpenOptions::new()
        .access_mode(FILE_READ_ATTRIBUTES)
        .custom_flags(FILE_FLAG_BACKUP_SEMANTICS)
        .open(path)?;

    // SAFETY: plain old data, zero is a valid bit pattern.
    let mut info: BY_HANDLE_FILE_INFORMATION = unsafe { mem::zeroed() };
    // SAFETY: the handle stays open for the call and `info` is writable.
    let ok = unsafe { GetFileInformationByHandle(file.as_raw_handle(), &mut info) };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(info)
}

pub(crate) fn hard_link_count(path: &Path) -> io::Result<u64> {
    file_information(path).map(|info| u64::from(info.nNumberOfLinks))
}

pub(crate) fn file_id(path: &Path) -> io::Result<FileId> {
    let info = file_information(path)?;
    let index = (u64::from(info.nFileIndexHigh) << 32) | u64::from(info.nFileIndexLow);
    Ok(FileId::new(u64::from(info.dwVolumeSerialNumber), index))
}

pub(crate) fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

pub(crate) fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

pub(crate) fn is_directory_symlink(path: &Path) -> io::Result<bool> {
    fs::symlink_metadata(path).map(|metadata| metadata.file_type().is_symlink_dir())
}

pub(crate) fn set_owner_read_write(path: &Path) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}

pub(crate) fn owner_can_write(path: &Path) -> io::Result<bool> {
    fs::metadata(path).map(|metadata| !metadata.permissions().readonly())
}
