#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `suite` is the long-path conformance run: it checks that the host allows
//! paths past the legacy 260-character limit, builds a short and a long
//! directory tree, and runs a fixed list of cases that exercise the
//! filesystem API with every mix of short and long arguments and working
//! directories.
//!
//! # Design
//!
//! - [`preflight`] verifies the OS build and the `LongPathsEnabled` opt-in.
//! - [`Layout`] plans the roots without touching the disk; [`Fixture`]
//!   creates them, prepares per-case directories, and removes everything on
//!   drop.
//! - [`cases`] holds the cases; each is a plain function over `&Fixture`.
//! - [`ops`] wraps every filesystem call so failures carry the operation name
//!   and the paths involved.
//! - [`Runner`] executes the cases in order, stops at the first failure, and
//!   produces a [`RunOutcome`] that maps onto [`ExitCode`].
//!
//! # Errors
//!
//! Every failure is a [`SuiteError`] in one of three categories: assertion,
//! filesystem operation, or other. The category decides the exit code.
//!
//! # Examples
//!
//! ```no_run
//! use suite::{RunOptions, run};
//!
//! let code = run(RunOptions::default(), &mut std::io::stderr());
//! std::process::exit(code.as_i32());
//! ```

mod error;
mod exit_code;
mod fixture;
mod layout;
mod test_file;

pub mod cases;
pub mod ops;
pub mod preflight;
pub mod runner;

pub use error::SuiteError;
pub use exit_code::ExitCode;
pub use fixture::{Fixture, FixtureOptions};
pub use layout::{
    LEGACY_MAX_PATH, LONG_SEGMENT_NAME_LEN, Layout, MAX_LONG_SEGMENTS, SHORT_ROOT_NAME_LEN,
    SHORT_TEST_PATH_RESERVED_LEN, path_len, random_name,
};
pub use runner::{RunOptions, RunOutcome, Runner, run};
pub use test_file::{DUMMY_CONTENT, TestFile};
