//! Failure taxonomy for the conformance run.

use std::io;
use std::path::{Path, PathBuf};

use crate::exit_code::ExitCode;

/// Error raised by a case, the fixture, or the preflight.
#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    /// An expected-vs-actual check failed.
    #[error("Line {line}: {message}")]
    Assertion {
        /// Stringified condition or custom message.
        message: String,
        /// Source line of the failing check.
        line: u32,
    },

    /// A filesystem operation returned an error.
    #[error("{operation}: {source}")]
    Filesystem {
        /// Name of the operation, e.g. `create_directory`.
        operation: &'static str,
        /// First path argument.
        path1: PathBuf,
        /// Second path argument; empty for single-path operations.
        path2: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },

    /// Any failure that is neither an assertion nor a filesystem error.
    #[error("{0}")]
    Other(String),

    /// A case panicked; carries the panic payload when it was a string.
    #[error("case panicked: {0}")]
    Panic(String),
}

impl SuiteError {
    /// Creates an assertion failure at `line`.
    pub fn assertion(message: impl Into<String>, line: u32) -> Self {
        Self::Assertion {
            message: message.into(),
            line,
        }
    }

    /// Creates a filesystem error for a single-path operation.
    pub fn filesystem(operation: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Filesystem {
            operation,
            path1: path.to_path_buf(),
            path2: PathBuf::new(),
            source,
        }
    }

    /// Creates a filesystem error for a two-path operation.
    pub fn filesystem2(
        operation: &'static str,
        path1: &Path,
        path2: &Path,
        source: io::Error,
    ) -> Self {
        Self::Filesystem {
            operation,
            path1: path1.to_path_buf(),
            path2: path2.to_path_buf(),
            source,
        }
    }

    /// Creates an uncategorised failure.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Returns the process exit code for this failure category.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Assertion { .. } => ExitCode::Assertion,
            Self::Filesystem { .. } => ExitCode::Filesystem,
            Self::Other(_) | Self::Panic(_) => ExitCode::Other,
        }
    }
}

/// Fails the enclosing function with [`SuiteError::Assertion`] unless the
/// condition holds.
///
/// Without a message the stringified condition is reported.
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        if !$cond {
            return Err($crate::SuiteError::assertion(stringify!($cond), line!()));
        }
    };
    ($cond:expr, $($message:tt)+) => {
        if !$cond {
            return Err($crate::SuiteError::assertion(format!($($message)+), line!()));
        }
    };
}

/// Fails the enclosing function unless both expressions compare equal,
/// reporting both values.
#[macro_export]
macro_rules! ensure_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return Err($crate::SuiteError::assertion(
                        format!(
                            "{} == {} (left: {:?}, right: {:?})",
                            stringify!($left),
                            stringify!($right),
                            left,
                            right
                        ),
                        line!(),
                    ));
                }
            }
        }
    };
}
