//! Process exit codes reported by the conformance run.
//!
//! Each failure category of [`SuiteError`](crate::SuiteError) has its own
//! code so wrappers (CI scripts, test harnesses) can tell an assertion
//! mismatch from a failing filesystem call without parsing stderr.
//!
//! | Code | Variant        | Meaning                                   |
//! |------|----------------|-------------------------------------------|
//! |  0   | `Ok`           | Every selected case passed                |
//! |  1   | `Assertion`    | An expected-vs-actual check failed        |
//! |  2   | `Filesystem`   | A filesystem operation returned an error  |
//! |  3   | `Other`        | Any other failure, including panics       |

use std::fmt;

/// Exit codes returned by `longpath-check`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful completion.
    Ok = 0,

    /// A test assertion failed.
    Assertion = 1,

    /// A filesystem operation failed.
    ///
    /// The report names the operation and both paths involved.
    Filesystem = 2,

    /// Any other failure: entropy, usage errors, panics inside a case.
    Other = 3,
}

impl ExitCode {
    /// Returns the numeric exit code value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns a human-readable description of this exit code.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Assertion => "assertion failed",
            Self::Filesystem => "filesystem operation failed",
            Self::Other => "other error",
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.as_i32() as u8)
    }
}
