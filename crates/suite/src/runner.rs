//! Sequential dispatch of the selected cases and failure reporting.
//!
//! The runner tracks the name of the stage that is executing (`setup` for
//! the preflight, `fixture_initialisation` while the roots are created, then
//! each case name) so a failure can be attributed in the report. The first
//! failure stops the run.

use std::any::Any;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use crate::cases::{self, Case};
use crate::{ExitCode, Fixture, FixtureOptions, SuiteError, preflight};

const RUNNER_TARGET: &str = "longpath::runner";

/// Stage name reported for preflight failures.
pub const SETUP_STAGE: &str = "setup";

/// Stage name reported for fixture construction failures.
pub const FIXTURE_STAGE: &str = "fixture_initialisation";

/// Host capability check run before the fixture is built.
pub type PreflightFn = fn() -> Result<(), SuiteError>;

/// Settings for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Names of the cases to run; all cases when empty. Order is ignored.
    pub cases: Vec<String>,
    /// Skip the host capability checks.
    pub skip_preflight: bool,
    /// Fixture settings.
    pub fixture: FixtureOptions,
}

/// Result of a run.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every selected case passed.
    Passed {
        /// Number of cases executed.
        cases: usize,
    },
    /// A stage failed and the run stopped.
    Failed {
        /// Stage or case that failed.
        stage: &'static str,
        /// The failure.
        error: SuiteError,
    },
}

impl RunOutcome {
    /// Exit code for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Passed { .. } => ExitCode::Ok,
            Self::Failed { error, .. } => error.exit_code(),
        }
    }

    /// Writes the failure report; writes nothing for a passing run.
    pub fn report<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let Self::Failed { stage, error } = self else {
            return Ok(());
        };

        writeln!(out, "Failing test: {stage}")?;
        match error {
            SuiteError::Assertion { .. } => writeln!(out, "\t{error}"),
            SuiteError::Filesystem { path1, path2, .. } => {
                writeln!(out, "FS Exception: {error}")?;
                writeln!(out, "\tPath 1: {}", path1.display())?;
                writeln!(out, "\tPath 2: {}", path2.display())
            }
            SuiteError::Other(_) | SuiteError::Panic(_) => {
                writeln!(out, "Other Exception: {error}")
            }
        }
    }
}

/// Runs the selected cases against one fixture.
#[derive(Debug)]
pub struct Runner {
    cases: Vec<&'static Case>,
    options: RunOptions,
    preflight: PreflightFn,
    current: &'static str,
}

impl Runner {
    /// Resolves the case selection.
    ///
    /// Selected cases keep their canonical order. Unknown names are rejected.
    pub fn new(options: RunOptions) -> Result<Self, SuiteError> {
        Self::with(options, preflight::run, cases::ALL)
    }

    /// Builds a runner over `available` with a substitute host check.
    #[doc(hidden)]
    pub fn with(
        options: RunOptions,
        preflight: PreflightFn,
        available: &'static [Case],
    ) -> Result<Self, SuiteError> {
        if let Some(unknown) = options
            .cases
            .iter()
            .find(|name| !available.iter().any(|case| case.name == name.as_str()))
        {
            return Err(SuiteError::other(format!("unknown case '{unknown}'")));
        }

        let cases = available
            .iter()
            .filter(|case| {
                options.cases.is_empty() || options.cases.iter().any(|name| name == case.name)
            })
            .collect();

        Ok(Self {
            cases,
            options,
            preflight,
            current: SETUP_STAGE,
        })
    }

    /// Names of the selected cases in execution order.
    pub fn case_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cases.iter().map(|case| case.name)
    }

    /// Stage that is running, or that failed once [`Runner::run`] returned.
    #[must_use]
    pub const fn current(&self) -> &'static str {
        self.current
    }

    /// Runs preflight, builds the fixture and executes every selected case.
    pub fn run(&mut self) -> RunOutcome {
        match self.run_stages() {
            Ok(cases) => {
                info!(target: RUNNER_TARGET, cases, "all cases passed");
                RunOutcome::Passed { cases }
            }
            Err(error) => {
                debug!(target: RUNNER_TARGET, stage = self.current, %error, "run failed");
                RunOutcome::Failed {
                    stage: self.current,
                    error,
                }
            }
        }
    }

    fn run_stages(&mut self) -> Result<usize, SuiteError> {
        self.current = SETUP_STAGE;
        if self.options.skip_preflight {
            warn!(target: RUNNER_TARGET, "skipping host capability checks");
        } else {
            (self.preflight)()?;
        }

        self.current = FIXTURE_STAGE;
        let mut fixture = Fixture::new(&self.options.fixture)?;

        for case in &self.cases {
            self.current = case.name;
            info!(target: RUNNER_TARGET, case = case.name, "running case");
            run_guarded(&mut fixture, case)?;
            info!(target: RUNNER_TARGET, case = case.name, "case passed");
        }
        Ok(self.cases.len())
    }
}

/// Runs `options`, writes the failure report to `stderr`, and returns the
/// exit code.
pub fn run<W: Write + ?Sized>(options: RunOptions, stderr: &mut W) -> ExitCode {
    let outcome = match Runner::new(options) {
        Ok(mut runner) => runner.run(),
        Err(error) => RunOutcome::Failed {
            stage: SETUP_STAGE,
            error,
        },
    };

    if let Err(error) = outcome.report(stderr) {
        warn!(target: RUNNER_TARGET, %error, "failed to write report");
    }
    outcome.exit_code()
}

fn run_guarded(fixture: &mut Fixture, case: &Case) -> Result<(), SuiteError> {
    match panic::catch_unwind(AssertUnwindSafe(|| fixture.test(case))) {
        Ok(result) => result,
        Err(payload) => Err(SuiteError::Panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn failed(stage: &'static str, error: SuiteError) -> RunOutcome {
        RunOutcome::Failed { stage, error }
    }

    fn render(outcome: &RunOutcome) -> String {
        let mut out = Vec::new();
        outcome.report(&mut out).expect("write to vec");
        String::from_utf8(out).expect("utf-8 report")
    }

    #[test]
    fn passing_run_reports_nothing() {
        let outcome = RunOutcome::Passed { cases: 23 };
        assert_eq!(render(&outcome), "");
        assert_eq!(outcome.exit_code(), ExitCode::Ok);
    }

    #[test]
    fn assertion_report_has_tabbed_line_message() {
        let outcome = failed("test_remove", SuiteError::assertion("fs::remove(x)", 42));
        assert_eq!(
            render(&outcome),
            "Failing test: test_remove\n\tLine 42: fs::remove(x)\n"
        );
        assert_eq!(outcome.exit_code(), ExitCode::Assertion);
    }

    #[test]
    fn filesystem_report_lists_both_paths() {
        let error = SuiteError::filesystem2(
            "rename",
            Path::new("/long/a1.txt"),
            Path::new("b1.txt"),
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        let report = render(&failed("test_rename", error));
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines[0], "Failing test: test_rename");
        assert_eq!(lines[1], "FS Exception: rename: missing");
        assert_eq!(lines[2], "\tPath 1: /long/a1.txt");
        assert_eq!(lines[3], "\tPath 2: b1.txt");
    }

    #[test]
    fn single_path_filesystem_report_leaves_second_path_blank() {
        let error = SuiteError::filesystem(
            "file_size",
            &PathBuf::from("foo.txt"),
            io::Error::other("denied"),
        );
        let report = render(&failed("test_file_size", error));
        assert!(report.ends_with("\tPath 2: \n"));
    }

    #[test]
    fn other_and_panic_reports_share_a_format() {
        let other = render(&failed(FIXTURE_STAGE, SuiteError::other("no entropy")));
        assert_eq!(
            other,
            "Failing test: fixture_initialisation\nOther Exception: no entropy\n"
        );

        let outcome = failed("test_status", SuiteError::Panic("boom".into()));
        assert!(render(&outcome).contains("Other Exception: case panicked: boom"));
        assert_eq!(outcome.exit_code(), ExitCode::Other);
    }

    #[test]
    fn selection_keeps_canonical_order() {
        let runner = Runner::new(RunOptions {
            cases: vec!["test_status".into(), "test_current_path".into()],
            ..RunOptions::default()
        })
        .expect("known cases");
        let names: Vec<_> = runner.case_names().collect();
        assert_eq!(names, ["test_current_path", "test_status"]);
        assert_eq!(runner.current(), SETUP_STAGE);
    }

    #[test]
    fn empty_selection_runs_everything() {
        let runner = Runner::new(RunOptions::default()).expect("runner");
        assert_eq!(runner.case_names().count(), cases::ALL.len());
    }

    #[test]
    fn unknown_case_is_rejected() {
        let error = Runner::new(RunOptions {
            cases: vec!["test_teleport".into()],
            ..RunOptions::default()
        })
        .expect_err("unknown");
        assert!(error.to_string().contains("test_teleport"));

        let mut stderr = Vec::new();
        let code = run(
            RunOptions {
                cases: vec!["test_teleport".into()],
                ..RunOptions::default()
            },
            &mut stderr,
        );
        assert_eq!(code, ExitCode::Other);
        assert!(String::from_utf8_lossy(&stderr).starts_with("Failing test: setup"));
    }

    #[test]
    fn panic_payloads_are_extracted() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }
}
