//! Flat and recursive directory iteration.

use std::path::Path;

use crate::ops::{self, FileKind};
use crate::test_file::TestFile;
use crate::{Fixture, SuiteError, ensure, ensure_eq};

type ListFn = fn(&Path) -> Result<Vec<FileKind>, SuiteError>;

/// Iterates `L` from the short cwd, then `.` and `S` from the long cwd; each
/// directory holds exactly two regular files.
fn iterate_both_trees(fixture: &Fixture, list: ListFn) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let _files = [
        TestFile::create(short.join("foo.txt"))?,
        TestFile::create(short.join("bar.txt"))?,
        TestFile::create(long.join("foo.txt"))?,
        TestFile::create(long.join("bar.txt"))?,
    ];

    let mut count = 0_usize;
    let mut visit = |dir: &Path, expected: usize| -> Result<(), SuiteError> {
        for kind in list(dir)? {
            ensure!(kind == FileKind::Regular, "{} holds a {kind:?}", dir.display());
            count += 1;
        }
        ensure_eq!(count, expected);
        Ok(())
    };

    // long path from short cwd
    visit(long, 2)?;

    ops::set_current_path(long)?;

    // long path from long cwd
    visit(Path::new("."), 4)?;

    // short path from long cwd
    visit(short, 6)?;
    Ok(())
}

pub(super) fn test_directory_iterator(fixture: &Fixture) -> Result<(), SuiteError> {
    iterate_both_trees(fixture, |dir| ops::directory_entries(dir))
}

pub(super) fn test_recursive_directory_iterator(fixture: &Fixture) -> Result<(), SuiteError> {
    iterate_both_trees(fixture, |dir| ops::recursive_entries(dir))
}
