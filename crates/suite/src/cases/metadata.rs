//! Size, timestamps, permissions and file status.

use std::path::Path;

use crate::ops::{self, FileKind};
use crate::test_file::{DUMMY_CONTENT, TestFile};
use crate::{Fixture, SuiteError, ensure, ensure_eq};

const DUMMY_LEN: u64 = DUMMY_CONTENT.len() as u64;

pub(super) fn test_is_empty(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let _short_file = TestFile::create(short.join("foo.txt"))?;
    let _long_file = TestFile::create(long.join("foo.txt"))?;

    // long path from short cwd
    ensure!(!ops::is_empty(long)?);
    ensure!(!ops::is_empty(long.join("foo.txt"))?);

    // long path from long cwd
    ops::set_current_path(long)?;
    ensure!(!ops::is_empty(".")?);
    ensure!(!ops::is_empty("foo.txt")?);

    // short path from long cwd
    ensure!(!ops::is_empty(short)?);
    ensure!(!ops::is_empty(short.join("foo.txt"))?);
    Ok(())
}

pub(super) fn test_file_size(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let _short_file = TestFile::create(short.join("foo.txt"))?;
    let _long_file = TestFile::create(long.join("foo.txt"))?;

    ensure_eq!(ops::file_size(long.join("foo.txt"))?, DUMMY_LEN);

    ops::set_current_path(long)?;
    ensure_eq!(ops::file_size("foo.txt")?, DUMMY_LEN);
    ensure_eq!(ops::file_size(short.join("foo.txt"))?, DUMMY_LEN);
    Ok(())
}

fn resize_and_check(path: &Path, len: u64) -> Result<(), SuiteError> {
    ops::resize_file(path, len)?;
    ensure_eq!(ops::file_size(path)?, len);
    Ok(())
}

pub(super) fn test_resize_file(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    {
        let _short_file = TestFile::create(short.join("foo.txt"))?;
        let _long_file = TestFile::create(long.join("foo.txt"))?;
    }

    // long path from short cwd
    resize_and_check(&long.join("foo.txt"), 7)?;

    // long path from long cwd
    ops::set_current_path(long)?;
    resize_and_check(Path::new("foo.txt"), 8)?;

    // short path from long cwd
    resize_and_check(&short.join("foo.txt"), 5)?;
    Ok(())
}

fn rewrite_mtime(path: &Path) -> Result<(), SuiteError> {
    let time = ops::last_write_time(path)?;
    ops::set_last_write_time(path, time)?;
    ensure_eq!(ops::last_write_time(path)?, time);
    Ok(())
}

pub(super) fn test_last_write_time(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let _short_file = TestFile::create(short.join("foo.txt"))?;
    let _long_file = TestFile::create(long.join("foo.txt"))?;

    rewrite_mtime(&long.join("foo.txt"))?;

    ops::set_current_path(long)?;
    rewrite_mtime(Path::new("foo.txt"))?;
    rewrite_mtime(&short.join("foo.txt"))?;
    Ok(())
}

fn grant_owner_read_write(path: &Path) -> Result<(), SuiteError> {
    ops::set_owner_read_write(path)?;
    ensure!(
        ops::owner_can_write(path)?,
        "{} is still read-only",
        path.display()
    );
    Ok(())
}

pub(super) fn test_permissions(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let _short_file = TestFile::create(short.join("foo.txt"))?;
    let _long_file = TestFile::create(long.join("foo.txt"))?;

    grant_owner_read_write(&long.join("foo.txt"))?;

    ops::set_current_path(long)?;
    grant_owner_read_write(Path::new("foo.txt"))?;
    grant_owner_read_write(&short.join("foo.txt"))?;
    Ok(())
}

pub(super) fn test_status(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let _short_file = TestFile::create(short.join("foo.txt"))?;
    let _long_file = TestFile::create(long.join("foo.txt"))?;

    // long path from short cwd
    ensure!(ops::status(long)? == FileKind::Directory);
    ensure!(ops::status(long.join("foo.txt"))? == FileKind::Regular);

    ops::set_current_path(long)?;

    // long path from long cwd
    ensure!(ops::status(".")? == FileKind::Directory);
    ensure!(ops::status("foo.txt")? == FileKind::Regular);

    // short path from long cwd
    ensure!(ops::status(short)? == FileKind::Directory);
    ensure!(ops::status(short.join("foo.txt"))? == FileKind::Regular);
    Ok(())
}
