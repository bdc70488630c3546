#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` maps the command-line verbosity flags of `longpath-check` onto a
//! [`tracing`] subscriber. Library crates emit events with the standard
//! `tracing` macros under targets rooted at [`TARGET_ROOT`]
//! (`longpath::fixture`, `longpath::runner`, ...); the binary installs the
//! subscriber once at startup.
//!
//! # Design
//!
//! - [`VerbosityConfig`] captures the selected [`Verbosity`] and renders it as
//!   an `EnvFilter` directive.
//! - [`init_tracing`] installs a `tracing-subscriber` fmt layer writing to
//!   standard error. `RUST_LOG` overrides the derived directive.
//!
//! # Examples
//!
//! ```
//! use logging::{Verbosity, VerbosityConfig};
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! assert_eq!(config.verbosity, Verbosity::Trace);
//! assert_eq!(config.directive(), "warn,longpath=trace");
//! ```

mod config;
mod subscriber;

pub use config::{TARGET_ROOT, Verbosity, VerbosityConfig};
pub use subscriber::{InitError, LOG_ENV, build_filter, init_tracing, try_init_tracing};
