//! Fixture construction, per-case directories and teardown.
//!
//! These tests change the process working directory, so they are serialized.

use std::env;
use std::path::Path;

use serial_test::serial;
use suite::cases::Case;
use suite::{
    Fixture, FixtureOptions, LEGACY_MAX_PATH, LONG_SEGMENT_NAME_LEN, SuiteError, ensure,
    path_len,
};

const LONG_NAME: &str = concat!(
    "test_with_an_exceedingly_long_name_",
    "that_keeps_going_well_past_what_any_",
    "reasonable_case_would_ever_be_called_",
    "and_still_continues_for_a_while_longer_",
    "so_that_the_short_directory_plus_the_",
    "reserved_space_cannot_fit_below_the_",
    "legacy_limit_no_matter_how_short_base_is_",
);

fn options(base: &Path) -> FixtureOptions {
    FixtureOptions {
        temp_dir: Some(base.to_path_buf()),
        ..FixtureOptions::default()
    }
}

fn cwd_is_short_dir(fixture: &Fixture) -> Result<(), SuiteError> {
    let cwd = env::current_dir().expect("cwd");
    ensure!(cwd == fixture.short_dir(), "cwd was {}", cwd.display());
    ensure!(fixture.long_dir().is_dir());
    ensure!(fixture.short_dir().ends_with("probe"));
    ensure!(fixture.long_dir().ends_with("probe"));
    Ok(())
}

fn always_fails(_fixture: &Fixture) -> Result<(), SuiteError> {
    ensure!(1 + 1 == 3);
    Ok(())
}

fn leaves_cwd_in_long_dir(fixture: &Fixture) -> Result<(), SuiteError> {
    env::set_current_dir(fixture.long_dir()).expect("chdir long");
    Ok(())
}

fn does_nothing(_fixture: &Fixture) -> Result<(), SuiteError> {
    Ok(())
}

#[test]
#[serial]
fn new_creates_both_roots_under_base() {
    let temp = tempfile::tempdir().expect("tempdir");
    let fixture = Fixture::new(&options(temp.path())).expect("fixture");
    let layout = fixture.layout().clone();

    assert!(layout.short_root.is_dir());
    assert!(layout.long_root.is_dir());
    assert_eq!(layout.short_root.parent(), layout.long_root_base.parent());
    assert!(layout.long_root.starts_with(&layout.long_root_base));
    assert!(path_len(&layout.long_root) > LEGACY_MAX_PATH);
    assert_eq!(
        layout.long_root_base.file_name().map(|name| name.len()),
        Some(LONG_SEGMENT_NAME_LEN)
    );
    assert_eq!(fixture.start_dir(), env::current_dir().expect("cwd"));
}

#[test]
#[serial]
fn drop_removes_both_trees_and_restores_cwd() {
    let temp = tempfile::tempdir().expect("tempdir");
    let start = env::current_dir().expect("cwd");
    let layout = {
        let mut fixture = Fixture::new(&options(temp.path())).expect("fixture");
        fixture
            .test(&Case::new("probe", leaves_cwd_in_long_dir))
            .expect("case");
        env::set_current_dir(fixture.long_dir()).expect("chdir long");
        fixture.layout().clone()
    };

    assert_eq!(env::current_dir().expect("cwd"), start);
    assert!(!layout.short_root.exists());
    assert!(!layout.long_root_base.exists());
    assert_eq!(std::fs::read_dir(temp.path()).expect("base").count(), 0);
}

#[test]
#[serial]
fn keep_tree_leaves_roots_on_disk() {
    let temp = tempfile::tempdir().expect("tempdir");
    let layout = {
        let fixture = Fixture::new(&FixtureOptions {
            keep_tree: true,
            ..options(temp.path())
        })
        .expect("fixture");
        fixture.layout().clone()
    };

    assert!(layout.short_root.is_dir());
    assert!(layout.long_root.is_dir());
}

#[test]
#[serial]
fn test_runs_case_in_short_dir() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut fixture = Fixture::new(&options(temp.path())).expect("fixture");

    fixture
        .test(&Case::new("probe", cwd_is_short_dir))
        .expect("case passes");
    assert_eq!(env::current_dir().expect("cwd"), fixture.start_dir());
}

#[test]
#[serial]
fn failing_case_still_restores_start_dir() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut fixture = Fixture::new(&options(temp.path())).expect("fixture");

    let error = fixture
        .test(&Case::new("probe", always_fails))
        .expect_err("case fails");
    assert!(matches!(error, SuiteError::Assertion { .. }));
    assert!(error.to_string().contains("1 + 1 == 3"));
    assert_eq!(env::current_dir().expect("cwd"), fixture.start_dir());
}

#[test]
#[serial]
fn per_case_directories_are_recreated_empty() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut fixture = Fixture::new(&options(temp.path())).expect("fixture");
    let case = Case::new("probe", does_nothing);

    fixture.test(&case).expect("first run");
    std::fs::write(fixture.long_dir().join("leftover"), b"x").expect("write");
    fixture.test(&case).expect("second run");

    assert!(!fixture.long_dir().join("leftover").exists());
}

#[test]
#[serial]
fn invalid_case_names_are_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut fixture = Fixture::new(&options(temp.path())).expect("fixture");

    let empty = fixture
        .test(&Case::new("", does_nothing))
        .expect_err("empty name");
    assert!(empty.to_string().contains("test name must not be empty"));

    let long = fixture
        .test(&Case::new(LONG_NAME, does_nothing))
        .expect_err("long name");
    assert!(long.to_string().contains("Test name is too long"));
}

#[test]
#[serial]
fn base_that_is_a_file_is_a_filesystem_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("not-a-dir");
    std::fs::write(&file, b"x").expect("write");

    let error = Fixture::new(&options(&file)).expect_err("file base");
    assert!(matches!(error, SuiteError::Filesystem { .. }));
}

#[test]
#[serial]
fn unreachable_threshold_is_an_assertion() {
    let temp = tempfile::tempdir().expect("tempdir");
    let error = Fixture::new(&FixtureOptions {
        threshold: 1_000_000,
        ..options(temp.path())
    })
    .expect_err("bounded nesting");
    assert!(matches!(error, SuiteError::Assertion { .. }));
}
