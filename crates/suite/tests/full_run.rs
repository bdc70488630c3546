//! End-to-end runs of the case list against the host filesystem.

use std::path::Path;

use serial_test::serial;
use platform::LongPathsSetting;
use suite::cases::Case;
use suite::runner::{FIXTURE_STAGE, PreflightFn, SETUP_STAGE};
use suite::{
    ExitCode, Fixture, FixtureOptions, RunOptions, RunOutcome, Runner, SuiteError, run,
};

fn options_in(base: &Path) -> RunOptions {
    RunOptions {
        fixture: FixtureOptions {
            temp_dir: Some(base.to_path_buf()),
            ..FixtureOptions::default()
        },
        ..RunOptions::default()
    }
}

fn render(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr).into_owned()
}

#[cfg(unix)]
#[test]
#[serial]
fn every_case_passes_on_host() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut stderr = Vec::new();

    let code = run(options_in(temp.path()), &mut stderr);

    assert_eq!(code, ExitCode::Ok, "report: {}", render(&stderr));
    assert!(stderr.is_empty());
    assert_eq!(std::fs::read_dir(temp.path()).expect("base").count(), 0);
}

#[cfg(unix)]
#[test]
#[serial]
fn selected_cases_run_in_canonical_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut runner = Runner::new(RunOptions {
        cases: vec!["test_hard_link_count".into(), "test_file_size".into()],
        ..options_in(temp.path())
    })
    .expect("runner");

    match runner.run() {
        RunOutcome::Passed { cases } => assert_eq!(cases, 2),
        RunOutcome::Failed { stage, error } => panic!("{stage} failed: {error}"),
    }
    assert_eq!(runner.current(), "test_hard_link_count");
}

#[test]
#[serial]
fn fixture_failure_is_attributed_to_initialisation() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("plain-file");
    std::fs::write(&file, b"x").expect("write");

    let mut stderr = Vec::new();
    let code = run(
        RunOptions {
            skip_preflight: true,
            ..options_in(&file)
        },
        &mut stderr,
    );

    assert_eq!(code, ExitCode::Filesystem);
    let report = render(&stderr);
    assert!(report.starts_with(&format!("Failing test: {FIXTURE_STAGE}\n")));
    assert!(report.contains("FS Exception: create_directories"));
    assert!(report.contains("\tPath 1: "));
}

#[test]
#[serial]
fn unbounded_threshold_fails_with_assertion() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut options = options_in(temp.path());
    options.skip_preflight = true;
    options.fixture.threshold = 1_000_000;

    let mut stderr = Vec::new();
    let code = run(options, &mut stderr);

    assert_eq!(code, ExitCode::Assertion);
    let report = render(&stderr);
    assert!(report.starts_with("Failing test: fixture_initialisation\n\tLine "));
}

#[test]
fn unknown_case_fails_before_setup() {
    let mut stderr = Vec::new();
    let code = run(
        RunOptions {
            cases: vec!["test_nothing".into()],
            ..RunOptions::default()
        },
        &mut stderr,
    );

    assert_eq!(code, ExitCode::Other);
    assert!(render(&stderr).starts_with(&format!("Failing test: {SETUP_STAGE}\n")));
}

fn long_paths_disabled() -> Result<(), SuiteError> {
    suite::preflight::check_long_paths_setting(&LongPathsSetting::Disabled(0))
}

fn host_ready() -> Result<(), SuiteError> {
    Ok(())
}

fn test_passes(_: &Fixture) -> Result<(), SuiteError> {
    Ok(())
}

fn test_sizes_differ(fixture: &Fixture) -> Result<(), SuiteError> {
    let short = fixture.short_dir().as_os_str().len();
    suite::ensure!(short > usize::MAX / 2, "short dir has {} characters", short);
    Ok(())
}

fn test_panics(_: &Fixture) -> Result<(), SuiteError> {
    panic!("directory vanished");
}

static CASES: &[Case] = &[
    Case::new("test_passes", test_passes),
    Case::new("test_sizes_differ", test_sizes_differ),
    Case::new("test_panics", test_panics),
];

fn run_selected(base: &Path, preflight: PreflightFn, case: &str) -> (RunOutcome, String) {
    let options = RunOptions {
        cases: vec!["test_passes".into(), case.into()],
        ..options_in(base)
    };
    let outcome = Runner::with(options, preflight, CASES)
        .expect("known cases")
        .run();
    let mut stderr = Vec::new();
    outcome.report(&mut stderr).expect("write report");
    (outcome, render(&stderr))
}

#[test]
#[serial]
fn failing_preflight_stops_before_any_directory_is_created() {
    let temp = tempfile::tempdir().expect("tempdir");
    let (outcome, report) = run_selected(temp.path(), long_paths_disabled, "test_panics");

    assert_eq!(outcome.exit_code(), ExitCode::Assertion);
    assert!(report.starts_with(&format!("Failing test: {SETUP_STAGE}\n\tLine ")));
    assert!(report.contains("not set to 1"));
    assert_eq!(std::fs::read_dir(temp.path()).expect("base").count(), 0);
}

#[test]
#[serial]
fn failed_check_inside_a_case_exits_with_assertion() {
    let temp = tempfile::tempdir().expect("tempdir");
    let start = std::env::current_dir().expect("cwd");
    let (outcome, report) = run_selected(temp.path(), host_ready, "test_sizes_differ");

    assert_eq!(outcome.exit_code(), ExitCode::Assertion);
    assert!(report.starts_with("Failing test: test_sizes_differ\n\tLine "));
    assert!(report.contains(": short dir has "));
    assert_eq!(std::env::current_dir().expect("cwd"), start);
    assert_eq!(std::fs::read_dir(temp.path()).expect("base").count(), 0);
}

#[test]
#[serial]
fn panicking_case_exits_with_other() {
    let temp = tempfile::tempdir().expect("tempdir");
    let start = std::env::current_dir().expect("cwd");
    let (outcome, report) = run_selected(temp.path(), host_ready, "test_panics");

    assert_eq!(outcome.exit_code(), ExitCode::Other);
    assert_eq!(
        report,
        "Failing test: test_panics\nOther Exception: case panicked: directory vanished\n"
    );
    assert_eq!(std::env::current_dir().expect("cwd"), start);
}

#[test]
fn substitute_case_list_rejects_names_outside_it() {
    let error = Runner::with(
        RunOptions {
            cases: vec!["test_current_path".into()],
            ..RunOptions::default()
        },
        host_ready,
        CASES,
    )
    .expect_err("not in the substitute list");
    assert!(error.to_string().contains("test_current_path"));
}
