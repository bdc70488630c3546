use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use logging::VerbosityConfig;
use suite::{FixtureOptions, LEGACY_MAX_PATH, RunOptions};

use crate::command::clap_command;

/// Environment variable consulted when `--temp-dir` is absent.
pub const TEMP_DIR_ENV: &str = "LONGPATH_CHECK_TMPDIR";

/// Errors raised while turning the command line into a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    /// clap rejected the arguments.
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// `--case` named a case that does not exist.
    #[error("unknown case '{0}' (use --list to see the available cases)")]
    UnknownCase(String),

    /// `--threshold` does not fit in the host's address space.
    #[error("threshold {0} is too large for this platform")]
    Threshold(u64),
}

/// Runtime configuration assembled from the command line and environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Print help and exit.
    pub show_help: bool,
    /// Print the version and exit.
    pub show_version: bool,
    /// Print the case names and exit.
    pub list: bool,
    /// Base directory for the fixture trees.
    pub temp_dir: Option<PathBuf>,
    /// Selected case names, validated against the case list.
    pub cases: Vec<String>,
    /// Keep the trees after the run.
    pub keep_tree: bool,
    /// Skip the host capability checks.
    pub skip_preflight: bool,
    /// Length limit for the run.
    pub threshold: usize,
    /// Log verbosity.
    pub verbosity: VerbosityConfig,
}

impl Config {
    /// Converts the configuration into suite run options.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            cases: self.cases.clone(),
            skip_preflight: self.skip_preflight,
            fixture: FixtureOptions {
                temp_dir: self.temp_dir.clone(),
                threshold: self.threshold,
                keep_tree: self.keep_tree,
            },
        }
    }
}

/// Parses `arguments` (including the program name) into a [`Config`].
///
/// `--temp-dir` falls back to the `LONGPATH_CHECK_TMPDIR` environment
/// variable when it is set and non-empty.
pub fn parse_args<I, S>(arguments: I) -> Result<Config, UsageError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(crate::PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let cases: Vec<String> = matches
        .remove_many::<String>("case")
        .map(Iterator::collect)
        .unwrap_or_default();
    if let Some(unknown) = cases.iter().find(|name| suite::cases::find(name).is_none()) {
        return Err(UsageError::UnknownCase(unknown.clone()));
    }

    let threshold = match matches.remove_one::<u64>("threshold") {
        Some(value) => usize::try_from(value).map_err(|_| UsageError::Threshold(value))?,
        None => LEGACY_MAX_PATH,
    };

    let verbosity = if matches.get_flag("quiet") {
        VerbosityConfig::quiet()
    } else {
        VerbosityConfig::from_verbose_level(matches.get_count("verbose"))
    };

    Ok(Config {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        list: matches.get_flag("list"),
        temp_dir: matches
            .remove_one::<PathBuf>("temp-dir")
            .or_else(env_temp_dir),
        cases,
        keep_tree: matches.get_flag("keep-tree"),
        skip_preflight: matches.get_flag("skip-preflight"),
        threshold,
        verbosity,
    })
}

fn env_temp_dir() -> Option<PathBuf> {
    let value = env::var_os(TEMP_DIR_ENV)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
