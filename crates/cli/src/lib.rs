#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front-end of `longpath-check`. It parses the
//! arguments with [`clap`], installs the tracing subscriber, and hands a
//! [`suite::RunOptions`] to the conformance runner.
//!
//! # Design
//!
//! [`run`] takes the argument iterator together with handles for standard
//! output and error so the whole front-end can be driven from tests. Help,
//! version and `--list` output go to standard output; usage errors and the
//! failure report go to standard error.
//!
//! # Errors
//!
//! Usage errors return exit code `3` (the "other" category). Everything else
//! returns the [`suite::ExitCode`] of the run.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["longpath-check", "--list"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().contains("test_current_path"));
//! ```

use std::ffi::OsString;
use std::io::Write;

use suite::ExitCode;
use tracing::debug;

mod arguments;
mod command;

pub use arguments::{Config, TEMP_DIR_ENV, UsageError, parse_args};
pub use command::PROGRAM_NAME;

const CLI_TARGET: &str = "longpath::cli";

/// Highest exit code the binary reports.
const MAX_EXIT_CODE: i32 = ExitCode::Other.as_i32();

/// Runs the front-end with `arguments` (including the program name).
///
/// Returns the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let config = match parse_args(arguments) {
        Ok(config) => config,
        Err(error) => {
            if let Err(write_error) = write_usage_error(&error, stderr) {
                debug!(target: CLI_TARGET, %write_error, "failed to write usage error");
            }
            return ExitCode::Other.as_i32();
        }
    };

    if config.show_help {
        let help = command::clap_command().render_help();
        return finish_output(writeln!(stdout, "{help}"));
    }

    if config.show_version {
        return finish_output(writeln!(
            stdout,
            "{PROGRAM_NAME} {}",
            env!("CARGO_PKG_VERSION")
        ));
    }

    if config.list {
        let listed = suite::cases::names().try_for_each(|name| writeln!(stdout, "{name}"));
        return finish_output(listed);
    }

    logging::init_tracing(&config.verbosity);
    debug!(target: CLI_TARGET, ?config, "starting run");

    suite::run(config.run_options(), stderr).as_i32()
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    std::process::ExitCode::from(clamp_status(status))
}

fn clamp_status(status: i32) -> u8 {
    u8::try_from(status.clamp(0, MAX_EXIT_CODE)).unwrap_or(u8::MAX)
}

fn write_usage_error<W: Write>(error: &UsageError, stderr: &mut W) -> std::io::Result<()> {
    match error {
        UsageError::Parse(error) => write!(stderr, "{}", error.render()),
        other => writeln!(stderr, "{PROGRAM_NAME}: {other}"),
    }
}

fn finish_output(result: std::io::Result<()>) -> i32 {
    match result {
        Ok(()) => ExitCode::Ok.as_i32(),
        Err(_) => ExitCode::Other.as_i32(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_capture(args: &[&str]) -> (i32, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = run(args.iter().copied(), &mut stdout, &mut stderr);
        (
            status,
            String::from_utf8(stdout).expect("utf-8 stdout"),
            String::from_utf8(stderr).expect("utf-8 stderr"),
        )
    }

    #[test]
    fn list_prints_every_case_in_order() {
        let (status, stdout, stderr) = run_capture(&["longpath-check", "--list"]);
        assert_eq!(status, 0);
        assert!(stderr.is_empty());
        let listed: Vec<_> = stdout.lines().collect();
        let expected: Vec<_> = suite::cases::names().collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn help_mentions_every_option() {
        let (status, stdout, _) = run_capture(&["longpath-check", "--help"]);
        assert_eq!(status, 0);
        for option in [
            "--temp-dir",
            "--case",
            "--list",
            "--keep-tree",
            "--skip-preflight",
            "--threshold",
            "--verbose",
            "--quiet",
        ] {
            assert!(stdout.contains(option), "help is missing {option}");
        }
    }

    #[test]
    fn version_reports_package_version() {
        let (status, stdout, _) = run_capture(&["longpath-check", "-V"]);
        assert_eq!(status, 0);
        assert_eq!(
            stdout.trim_end(),
            format!("longpath-check {}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn usage_errors_exit_with_other() {
        let (status, _, stderr) = run_capture(&["longpath-check", "--no-such-flag"]);
        assert_eq!(status, 3);
        assert!(stderr.contains("--no-such-flag"));

        let (status, _, stderr) = run_capture(&["longpath-check", "--case", "test_bogus"]);
        assert_eq!(status, 3);
        assert!(stderr.contains("unknown case 'test_bogus'"));
    }

    #[test]
    fn exit_codes_are_clamped() {
        assert_eq!(clamp_status(2), 2);
        assert_eq!(clamp_status(-1), 0);
        assert_eq!(clamp_status(40), 3);
    }
}
