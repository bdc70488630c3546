//! Planning of the short and long root directories.
//!
//! The plan is computed without touching the filesystem so the nesting rule
//! can be checked in isolation; [`Fixture`](crate::Fixture) creates the
//! directories afterwards.

use std::path::{Path, PathBuf};

use crate::{SuiteError, ensure};

/// Legacy path-length limit of the host.
pub const LEGACY_MAX_PATH: usize = 260;

/// Characters a per-case short directory must leave free below the limit.
pub const SHORT_TEST_PATH_RESERVED_LEN: usize = 10;

/// Length of the short root's random name.
pub const SHORT_ROOT_NAME_LEN: usize = 8;

/// Length of each random segment of the long root.
pub const LONG_SEGMENT_NAME_LEN: usize = 32;

/// Upper bound on long-root segments below the long root base.
///
/// Keeps generation finite for large thresholds; 64 segments already exceed
/// 2000 characters.
pub const MAX_LONG_SEGMENTS: usize = 64;

const NAME_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// Returns the length of `path` as the host counts it.
///
/// Windows limits are expressed in UTF-16 code units; elsewhere the byte
/// length of the native encoding is used.
#[must_use]
pub fn path_len(path: &Path) -> usize {
    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStrExt;
        path.as_os_str().encode_wide().count()
    }
    #[cfg(not(windows))]
    {
        path.as_os_str().len()
    }
}

/// Generates a name of `len` random uppercase hex characters.
pub fn random_name(len: usize) -> Result<String, SuiteError> {
    let mut bytes = vec![0u8; len];
    getrandom::fill(&mut bytes)
        .map_err(|error| SuiteError::other(format!("failed to gather entropy: {error}")))?;

    Ok(bytes
        .iter()
        .map(|&byte| NAME_CHARS[usize::from(byte) % NAME_CHARS.len()] as char)
        .collect())
}

/// Root directories of one conformance run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Root of the short tree, `base/<8 hex>`.
    pub short_root: PathBuf,
    /// First directory of the long tree, `base/<32 hex>`.
    pub long_root_base: PathBuf,
    /// Deepest directory of the long tree; longer than the threshold.
    pub long_root: PathBuf,
}

impl Layout {
    /// Plans both roots under `base`.
    ///
    /// `name` is called with the required length for every directory name.
    /// The short root must stay below `threshold`; the long root is extended
    /// with further segments until it is longer than `threshold`.
    pub fn plan<F>(base: &Path, threshold: usize, mut name: F) -> Result<Self, SuiteError>
    where
        F: FnMut(usize) -> Result<String, SuiteError>,
    {
        let short_root = base.join(name(SHORT_ROOT_NAME_LEN)?);
        ensure!(
            path_len(&short_root) < threshold,
            "The short root test directory will exceed the windows long path limit. \
             Please start this test suite from a shorter path"
        );

        let long_root_base = base.join(name(LONG_SEGMENT_NAME_LEN)?);
        let mut long_root = long_root_base.clone();
        let mut segments = 0;
        while path_len(&long_root) <= threshold {
            ensure!(
                segments < MAX_LONG_SEGMENTS,
                "The long root test directory needs more than {MAX_LONG_SEGMENTS} nested \
                 directories to exceed {threshold} characters"
            );
            long_root.push(name(LONG_SEGMENT_NAME_LEN)?);
            segments += 1;
        }

        Ok(Self {
            short_root,
            long_root_base,
            long_root,
        })
    }

    /// Number of directories between the long root base and the long root.
    #[must_use]
    pub fn long_depth(&self) -> usize {
        self.long_root
            .strip_prefix(&self.long_root_base)
            .map_or(0, |rest| rest.components().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(len: usize) -> Result<String, SuiteError> {
        Ok("A".repeat(len))
    }

    #[test]
    fn random_name_uses_uppercase_hex() {
        let name = random_name(64).expect("entropy");
        assert_eq!(name.len(), 64);
        assert!(name.bytes().all(|b| NAME_CHARS.contains(&b)));
    }

    #[test]
    fn random_names_differ() {
        assert_ne!(random_name(32).unwrap(), random_name(32).unwrap());
    }

    #[test]
    fn long_root_exceeds_threshold_with_full_segments() {
        let base = Path::new("/tmp");
        let layout = Layout::plan(base, LEGACY_MAX_PATH, fixed).expect("plan");

        assert!(path_len(&layout.long_root) > LEGACY_MAX_PATH);
        assert!(layout.long_root.starts_with(&layout.long_root_base));
        for component in layout.long_root.strip_prefix(base).unwrap().components() {
            assert_eq!(component.as_os_str().len(), LONG_SEGMENT_NAME_LEN);
        }
        // One segment fewer must not be enough.
        let parent = layout.long_root.parent().unwrap();
        assert!(path_len(parent) <= LEGACY_MAX_PATH);
    }

    #[test]
    fn short_root_is_eight_characters_under_base() {
        let base = Path::new("/tmp");
        let layout = Layout::plan(base, LEGACY_MAX_PATH, fixed).expect("plan");
        assert_eq!(layout.short_root, base.join("AAAAAAAA"));
    }

    #[test]
    fn long_base_already_over_threshold_needs_no_segments() {
        let layout = Layout::plan(Path::new("/tmp"), 20, fixed).expect("plan");
        assert_eq!(layout.long_root, layout.long_root_base);
        assert_eq!(layout.long_depth(), 0);
    }

    #[test]
    fn short_root_over_threshold_is_rejected() {
        let error = Layout::plan(Path::new("/tmp"), 10, fixed).expect_err("too long");
        assert!(matches!(error, SuiteError::Assertion { .. }));
        assert!(error.to_string().contains("short root"));
    }

    #[test]
    fn segment_generation_is_bounded() {
        let error = Layout::plan(Path::new("/tmp"), 1_000_000, fixed).expect_err("bounded");
        assert!(error.to_string().contains("nested"));
    }

    #[test]
    fn threshold_just_above_base_requires_one_segment() {
        let base = Path::new("/tmp");
        let base_len = path_len(&base.join(fixed(LONG_SEGMENT_NAME_LEN).unwrap()));
        let layout = Layout::plan(base, base_len, fixed).expect("plan");
        assert_eq!(layout.long_depth(), 1);
    }

    #[test]
    fn entropy_failures_propagate() {
        let error = Layout::plan(Path::new("/tmp"), LEGACY_MAX_PATH, |_| {
            Err(SuiteError::other("no entropy"))
        })
        .expect_err("propagates");
        assert!(matches!(error, SuiteError::Other(_)));
    }
}
