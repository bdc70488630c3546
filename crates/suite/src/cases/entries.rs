//! Creating, removing, renaming and copying directory entries.

use crate::test_file::{DUMMY_CONTENT, TestFile};
use crate::{Fixture, SuiteError, ensure, ensure_eq, ops};

pub(super) fn test_create_directory(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());

    // long path from short cwd
    ops::create_directory(long.join("foo"))?;

    // long path from long cwd
    ops::set_current_path(long)?;
    ops::create_directory("bar")?;

    // short path from long cwd
    ops::create_directory(short.join("baz"))?;
    Ok(())
}

pub(super) fn test_remove(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    {
        let _short_file = TestFile::create(short.join("foo.txt"))?;
        ops::create_directory(short.join("bar"))?;

        let _long_file = TestFile::create(long.join("foo.txt"))?;
        let _long_other = TestFile::create(long.join("bar.txt"))?;
        ops::create_directory(long.join("baz"))?;
        ops::create_directory(long.join("qux"))?;
    }

    // long path from short cwd
    ensure!(ops::remove(long.join("foo.txt"))?);
    ensure!(ops::remove(long.join("baz"))?);

    ops::set_current_path(long)?;

    // long path from long cwd
    ensure!(ops::remove("bar.txt")?);
    ensure!(ops::remove("qux")?);

    // short path from long cwd
    ensure!(ops::remove(short.join("foo.txt"))?);
    ensure!(ops::remove(short.join("bar"))?);
    Ok(())
}

pub(super) fn test_rename(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    {
        let _file = TestFile::create(long.join("a1.txt"))?;
        ops::create_directory(long.join("a2"))?;
    }

    // long to short from short cwd
    ops::rename(long.join("a1.txt"), "b1.txt")?;
    ops::rename(long.join("a2"), "b2")?;

    ops::set_current_path(long)?;

    // short to long from long cwd
    ops::rename(short.join("b1.txt"), "c1.txt")?;
    ops::rename(short.join("b2"), "c2")?;

    // long to long from long cwd
    ops::rename("c1.txt", "d1.txt")?;
    ops::rename("c2", "d2")?;

    // long to short from long cwd
    ops::rename("d1.txt", short.join("e1.txt"))?;
    ops::rename("d2", short.join("e2"))?;
    Ok(())
}

pub(super) fn test_copy_file(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    drop(TestFile::create(short.join("a.txt"))?);

    // from short cwd: short to long, long to long, long to short
    ops::copy_file("a.txt", long.join("b.txt"))?;
    ops::copy_file(long.join("b.txt"), long.join("c.txt"))?;
    ops::copy_file(long.join("c.txt"), "d.txt")?;

    ops::set_current_path(long)?;

    // from long cwd: short to long, long to long, long to short
    ops::copy_file(short.join("d.txt"), "e.txt")?;
    ops::copy_file("e.txt", "f.txt")?;
    let copied = ops::copy_file("f.txt", short.join("g.txt"))?;
    ensure_eq!(copied, DUMMY_CONTENT.len() as u64);
    Ok(())
}
