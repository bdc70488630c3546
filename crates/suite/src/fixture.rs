//! Short and long directory trees shared by every case of a run.
//!
//! A [`Fixture`] owns two roots under the base directory: a short one well
//! below the path limit and a long one nested past it. Each case gets a fresh
//! subdirectory named after it in both trees, and runs with the short one as
//! the working directory. Dropping the fixture restores the start directory
//! and removes both trees.

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cases::Case;
use crate::layout::{LEGACY_MAX_PATH, Layout, SHORT_TEST_PATH_RESERVED_LEN, path_len, random_name};
use crate::{SuiteError, ensure, ops};

const FIXTURE_TARGET: &str = "longpath::fixture";

/// Settings for building a [`Fixture`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureOptions {
    /// Base directory for both roots; the system temp dir when `None`.
    pub temp_dir: Option<PathBuf>,
    /// Length the long root must exceed and short paths must stay below.
    pub threshold: usize,
    /// Leave both trees on disk when the fixture is dropped.
    pub keep_tree: bool,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            temp_dir: None,
            threshold: LEGACY_MAX_PATH,
            keep_tree: false,
        }
    }
}

/// Directory trees and working-directory state for one run.
#[derive(Debug)]
pub struct Fixture {
    start_dir: PathBuf,
    layout: Layout,
    threshold: usize,
    keep_tree: bool,
    short_dir: PathBuf,
    long_dir: PathBuf,
}

impl Fixture {
    /// Plans and creates both root directories.
    ///
    /// The working directory must be absolute and shorter than the threshold.
    pub fn new(options: &FixtureOptions) -> Result<Self, SuiteError> {
        let threshold = options.threshold;
        let start_dir = ops::current_path()?;
        ensure!(
            start_dir.is_absolute(),
            "current_path should return an absolute path"
        );
        ensure!(
            path_len(&start_dir) < threshold,
            "This test suite should be started from a short path"
        );

        let base = options.temp_dir.clone().unwrap_or_else(env::temp_dir);
        ops::create_directories(&base)?;
        let base = resolve_base(&base)?;
        debug!(target: FIXTURE_TARGET, base = %base.display(), threshold, "planning roots");

        let layout = Layout::plan(&base, threshold, random_name)?;
        let fixture = Self {
            short_dir: layout.short_root.clone(),
            long_dir: layout.long_root.clone(),
            start_dir,
            layout,
            threshold,
            keep_tree: options.keep_tree,
        };

        // Constructed first so a failure below still removes what was created.
        info!(
            target: FIXTURE_TARGET,
            path = %fixture.layout.short_root.display(),
            "Creating short root directory"
        );
        ops::remove_all(&fixture.layout.short_root)?;
        ops::create_directories(&fixture.layout.short_root)?;

        info!(
            target: FIXTURE_TARGET,
            path = %fixture.layout.long_root.display(),
            depth = fixture.layout.long_depth(),
            "Creating long root directory"
        );
        ops::remove_all(&fixture.layout.long_root_base)?;
        ops::create_directories(&fixture.layout.long_root)?;

        Ok(fixture)
    }

    /// Runs `case` in fresh per-case directories with the short one as cwd.
    ///
    /// The start directory is restored before the case result is returned.
    pub fn test(&mut self, case: &Case) -> Result<(), SuiteError> {
        ensure!(!case.name.is_empty(), "test name must not be empty");
        self.short_dir = self.layout.short_root.join(case.name);
        self.long_dir = self.layout.long_root.join(case.name);
        ensure!(
            path_len(&self.short_dir) + SHORT_TEST_PATH_RESERVED_LEN < self.threshold,
            "Test name is too long"
        );

        info!(target: FIXTURE_TARGET, path = %self.short_dir.display(), "Creating short test directory");
        ops::remove_all(&self.short_dir)?;
        ops::create_directory(&self.short_dir)?;

        info!(target: FIXTURE_TARGET, path = %self.long_dir.display(), "Creating long test directory");
        ops::remove_all(&self.long_dir)?;
        ops::create_directory(&self.long_dir)?;

        ops::set_current_path(&self.short_dir)?;
        let result = (case.run)(self);
        let restored = ops::set_current_path(&self.start_dir);
        result.and(restored)
    }

    /// Working directory at construction; restored after every case.
    #[must_use]
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Planned root directories.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Per-case directory under the short root.
    #[must_use]
    pub fn short_dir(&self) -> &Path {
        &self.short_dir
    }

    /// Per-case directory under the long root.
    #[must_use]
    pub fn long_dir(&self) -> &Path {
        &self.long_dir
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        if let Err(error) = env::set_current_dir(&self.start_dir) {
            warn!(
                target: FIXTURE_TARGET,
                path = %self.start_dir.display(),
                %error,
                "failed to restore start directory"
            );
        }

        if self.keep_tree {
            info!(
                target: FIXTURE_TARGET,
                short_root = %self.layout.short_root.display(),
                long_root = %self.layout.long_root_base.display(),
                "keeping fixture trees"
            );
            return;
        }

        for (kind, root) in [
            ("short", &self.layout.short_root),
            ("long", &self.layout.long_root_base),
        ] {
            if let Err(error) = ops::remove_all(root) {
                warn!(
                    target: FIXTURE_TARGET,
                    path = %root.display(),
                    %error,
                    "Warning, failed to clean up {kind} root directory after test"
                );
            }
        }
    }
}

// Canonical paths on Windows are `\\?\` verbatim paths, which bypass the limit
// under test.
#[cfg(windows)]
fn resolve_base(base: &Path) -> Result<PathBuf, SuiteError> {
    ops::absolute(base)
}

#[cfg(not(windows))]
fn resolve_base(base: &Path) -> Result<PathBuf, SuiteError> {
    ops::canonical(base)
}
