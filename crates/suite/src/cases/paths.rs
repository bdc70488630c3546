//! Working directory changes and path resolution.

use crate::{Fixture, SuiteError, ensure, ops};

pub(super) fn test_current_path(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());

    // short cwd to long cwd
    ops::set_current_path(long)?;
    let current = ops::current_path()?;
    ensure!(current == long);

    // long cwd to short cwd
    ops::set_current_path(short)?;
    let current = ops::current_path()?;
    ensure!(current == short);
    Ok(())
}

pub(super) fn test_absolute(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let expected = long.join("foo");
    ops::create_directory(&expected)?;

    // long path from short cwd
    let relative = ops::relative(&expected)?;
    let actual = ops::absolute(&relative)?;
    ensure!(expected == actual || short.join(&relative) == actual);

    ops::set_current_path(long)?;

    // long path from long cwd
    let actual = ops::absolute("foo")?;
    ensure!(expected == actual);

    // short path from long cwd
    let relative = ops::relative(short)?;
    let actual = ops::absolute(&relative)?;
    ensure!(actual == short || long.join(&relative) == actual);
    Ok(())
}

pub(super) fn test_canonical(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());
    let dir = long.join("foo");
    ops::create_directory(&dir)?;
    let expected = ops::canonical(&dir)?;

    // long path from short cwd
    let actual = ops::canonical(ops::relative(&dir)?)?;
    ensure!(expected == actual);

    ops::set_current_path(long)?;

    // long path from long cwd
    let actual = ops::canonical("foo")?;
    ensure!(expected == actual);

    // short path from long cwd
    let actual = ops::canonical(ops::relative(short)?)?;
    let expected = ops::canonical(short)?;
    ensure!(expected == actual);
    Ok(())
}

pub(super) fn test_weakly_canonical(fixture: &Fixture) -> Result<(), SuiteError> {
    let (short, long) = (fixture.short_dir(), fixture.long_dir());

    // missing long path from short cwd
    let expected = ops::canonical(long)?.join("foo");
    let unresolved = ops::relative(long)?.join("foo");
    let actual = ops::weakly_canonical(&unresolved)?;
    ensure!(expected == actual || unresolved == actual);

    ops::set_current_path(long)?;

    // missing long path from long cwd
    let actual = ops::weakly_canonical("foo")?;
    ensure!(expected == actual || actual.as_os_str() == "foo");

    // missing short path from long cwd
    let expected = ops::canonical(short)?.join("foo");
    let unresolved = ops::relative(short)?.join("foo");
    let actual = ops::weakly_canonical(&unresolved)?;
    ensure!(expected == actual || unresolved == actual);
    Ok(())
}
