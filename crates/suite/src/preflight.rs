//! Host capability checks performed before the fixture is built.

use platform::{FILESYSTEM_KEY, LONG_PATHS_VALUE, LongPathsSetting, OsVersion, PlatformError};
use tracing::{debug, info};

use crate::{SuiteError, ensure};

const PREFLIGHT_TARGET: &str = "longpath::preflight";

/// First build of Windows 10 that honours `LongPathsEnabled` (version 1607).
pub const MIN_WINDOWS_10_BUILD: u32 = 14393;

const UNSUPPORTED_OS: &str =
    "This test suite is not supported on platforms older than Windows 10 version 1607";

/// Fails unless `version` is Windows 10 build 14393 or newer.
pub fn check_os_version(version: &OsVersion) -> Result<(), SuiteError> {
    ensure!(version.major >= 10, "{UNSUPPORTED_OS}");
    if version.major == 10 && version.minor == 0 {
        ensure!(version.build >= MIN_WINDOWS_10_BUILD, "{UNSUPPORTED_OS}");
    }
    Ok(())
}

/// Fails unless the long-path opt-in is enabled or not applicable.
pub fn check_long_paths_setting(setting: &LongPathsSetting) -> Result<(), SuiteError> {
    match *setting {
        LongPathsSetting::Enabled | LongPathsSetting::NotApplicable => Ok(()),
        LongPathsSetting::KeyMissing => Err(setup_failure(
            format!(
                "The registry key HKEY_LOCAL_MACHINE\\{FILESYSTEM_KEY} does not exist on the host machine"
            ),
            line!(),
        )),
        LongPathsSetting::ValueMissing => Err(setup_failure(
            format!("The registry key {LONG_PATHS_VALUE} does not exist on the host machine"),
            line!(),
        )),
        LongPathsSetting::Unreadable(code) => Err(setup_failure(
            format!(
                "Failed to query value of registry key {LONG_PATHS_VALUE} \
                 under HKEY_LOCAL_MACHINE\\{FILESYSTEM_KEY} (error {code})"
            ),
            line!(),
        )),
        LongPathsSetting::WrongType(kind) => Err(setup_failure(
            format!("The registry key {LONG_PATHS_VALUE} is not a DWORD (type {kind})"),
            line!(),
        )),
        LongPathsSetting::Disabled(value) => Err(setup_failure(
            format!(
                "The registry key {LONG_PATHS_VALUE} is not set to 1 on the host machine (found {value})"
            ),
            line!(),
        )),
    }
}

fn setup_failure(message: String, line: u32) -> SuiteError {
    SuiteError::assertion(message, line)
}

/// Runs both checks against the live host.
pub fn run() -> Result<(), SuiteError> {
    match platform::os_version() {
        Ok(version) => {
            debug!(target: PREFLIGHT_TARGET, %version, "host version");
            check_os_version(&version)?;
        }
        Err(PlatformError::Unsupported(what)) => {
            debug!(target: PREFLIGHT_TARGET, what, "version check not applicable");
        }
        Err(error) => return Err(SuiteError::other(error.to_string())),
    }

    let setting = platform::long_paths_setting();
    debug!(target: PREFLIGHT_TARGET, ?setting, "long path setting");
    check_long_paths_setting(&setting)?;

    info!(target: PREFLIGHT_TARGET, "host supports long paths");
    Ok(())
}
