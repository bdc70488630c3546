//! Help, version and listing output of the `longpath-check` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn longpath_check() -> Command {
    Command::new(env!("CARGO_BIN_EXE_longpath-check"))
}

#[test]
fn help_lists_usage_on_stdout() {
    longpath_check()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("longpath-check"))
        .stdout(predicate::str::contains("--threshold"));
}

#[test]
fn version_prints_package_version() {
    longpath_check()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "longpath-check {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn list_prints_twenty_three_cases() {
    let output = longpath_check().arg("--list").output().expect("run binary");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    let names: Vec<_> = stdout.lines().collect();
    assert_eq!(names.len(), 23);
    assert_eq!(names.first(), Some(&"test_current_path"));
    assert_eq!(names.last(), Some(&"test_recursive_directory_iterator"));
}
