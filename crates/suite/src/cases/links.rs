//! Hard links, symlinks and file identity.

use std::path::{Path, PathBuf};

use crate::ops::{self, FileKind};
use crate::test_file::TestFile;
use crate::{Fixture, SuiteError, ensure};

type LinkFn = fn(&Path, &Path) -> Result<(), SuiteError>;

/// Links every combination of short and long target, link name and cwd.
fn create_link_matrix(fixture: &Fixture, link: LinkFn) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());

    // from short cwd
    link(&long.join("foo.txt"), Path::new("a"))?;
    link(&long.join("foo.txt"), &long.join("b"))?;
    link(Path::new("foo.txt"), &long.join("c"))?;

    ops::set_current_path(long)?;

    // from long cwd
    link(Path::new("foo.txt"), &short.join("d"))?;
    link(Path::new("foo.txt"), Path::new("e"))?;
    link(&short.join("foo.txt"), Path::new("f"))?;
    Ok(())
}

pub(super) fn test_create_hard_link(fixture: &Fixture) -> Result<(), SuiteError> {
    let _short_file = TestFile::create(fixture.short_dir().join("foo.txt"))?;
    let _long_file = TestFile::create(fixture.long_dir().join("foo.txt"))?;
    create_link_matrix(fixture, |target, link| ops::create_hard_link(target, link))
}

pub(super) fn test_create_symlink(fixture: &Fixture) -> Result<(), SuiteError> {
    let _short_file = TestFile::create(fixture.short_dir().join("foo.txt"))?;
    let _long_file = TestFile::create(fixture.long_dir().join("foo.txt"))?;
    create_link_matrix(fixture, |target, link| ops::create_symlink(target, link))
}

pub(super) fn test_create_directory_symlink(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    ops::create_directory(short.join("foo"))?;
    ops::create_directory(long.join("foo"))?;

    // from short cwd
    ops::create_directory_symlink(long.join("foo"), "a")?;
    ops::create_directory_symlink(long.join("foo"), long.join("b"))?;
    ops::create_directory_symlink("foo", long.join("c"))?;

    ops::set_current_path(long)?;

    // from long cwd
    ops::create_directory_symlink("foo", short.join("d"))?;
    ops::create_directory_symlink("foo", "e")?;
    ops::create_directory_symlink(short.join("foo"), "f")?;
    Ok(())
}

pub(super) fn test_symlink_status(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let _short_file = TestFile::create(short.join("foo.txt"))?;
    let _long_file = TestFile::create(long.join("foo.txt"))?;

    ops::create_symlink(long.join("foo.txt"), short.join("a"))?;
    ops::create_symlink(short, long.join("b"))?;

    // long path from short cwd
    let kind = ops::symlink_status(long.join("b"))?;
    ensure!(kind == FileKind::Symlink);

    ops::set_current_path(long)?;

    // long path from long cwd
    let kind = ops::symlink_status("b")?;
    ensure!(kind == FileKind::Symlink);

    // short path from long cwd
    let kind = ops::symlink_status(short.join("a"))?;
    ensure!(kind == FileKind::Symlink);
    Ok(())
}

/// Creates `a -> L/foo.txt`, `L/b -> foo.txt` and `L/c -> S/foo.txt`.
fn create_read_links(short: &Path, long: &Path) -> Result<(), SuiteError> {
    ops::create_symlink(long.join("foo.txt"), "a")?;
    ops::create_symlink("foo.txt", long.join("b"))?;
    ops::create_symlink(short.join("foo.txt"), long.join("c"))
}

pub(super) fn test_read_symlink(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let _short_file = TestFile::create(short.join("foo.txt"))?;
    let _long_file = TestFile::create(long.join("foo.txt"))?;
    create_read_links(short, long)?;

    // from short cwd
    ensure!(ops::read_symlink("a")? == long.join("foo.txt"));
    ensure!(ops::read_symlink(long.join("b"))? == Path::new("foo.txt"));
    ensure!(ops::read_symlink(long.join("c"))? == short.join("foo.txt"));

    ops::set_current_path(long)?;

    // from long cwd
    ensure!(ops::read_symlink(short.join("a"))? == long.join("foo.txt"));
    ensure!(ops::read_symlink("b")? == Path::new("foo.txt"));
    ensure!(ops::read_symlink("c")? == short.join("foo.txt"));
    Ok(())
}

pub(super) fn test_hard_link_count(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let _short_file = TestFile::create(short.join("foo.txt"))?;
    let _long_file = TestFile::create(long.join("foo.txt"))?;

    ops::create_hard_link(long.join("foo.txt"), short.join("a"))?;
    ops::create_hard_link(short.join("foo.txt"), long.join("b"))?;

    ensure!(ops::hard_link_count(long.join("foo.txt"))? == 2);

    ops::set_current_path(long)?;

    ensure!(ops::hard_link_count("foo.txt")? == 2);
    ensure!(ops::hard_link_count(short.join("foo.txt"))? == 2);
    Ok(())
}

/// Resolves a symlink target; relative targets are joined onto the absolute
/// parent of the link.
fn resolve_link(link: impl AsRef<Path>) -> Result<PathBuf, SuiteError> {
    let link = link.as_ref();
    let target = ops::read_symlink(link)?;
    if target.is_absolute() {
        return Ok(target);
    }

    let parent = match link.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ops::absolute(parent)?,
        _ => ops::current_path()?,
    };
    Ok(parent.join(target))
}

pub(super) fn test_equivalent(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let _short_file = TestFile::create(short.join("foo.txt"))?;
    let _long_file = TestFile::create(long.join("foo.txt"))?;
    create_read_links(short, long)?;

    // from short cwd
    ensure!(ops::equivalent(resolve_link("a")?, long.join("foo.txt"))?);
    ensure!(ops::equivalent(resolve_link(long.join("b"))?, long.join("foo.txt"))?);
    ensure!(ops::equivalent(resolve_link(long.join("c"))?, short.join("foo.txt"))?);

    ops::set_current_path(long)?;

    // from long cwd
    ensure!(ops::equivalent(resolve_link(short.join("a"))?, long.join("foo.txt"))?);
    ensure!(ops::equivalent(resolve_link("b")?, "foo.txt")?);
    ensure!(ops::equivalent(resolve_link("c")?, short.join("foo.txt"))?);
    Ok(())
}
