//! Verbosity configuration derived from `-v`/`--quiet` flags.

use tracing::level_filters::LevelFilter;

/// Root of every tracing target emitted by the workspace.
pub const TARGET_ROOT: &str = "longpath";

/// Coarse output level selected on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Warnings and errors only.
    Quiet,
    /// Fixture setup and per-case progress.
    #[default]
    Normal,
    /// Individual filesystem operations.
    Verbose,
    /// Everything, including path computations.
    Trace,
}

/// Verbosity configuration consumed by [`init_tracing`](crate::init_tracing).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerbosityConfig {
    /// Selected verbosity.
    pub verbosity: Verbosity,
    /// Whether log lines include the emitting target.
    pub show_targets: bool,
}

impl VerbosityConfig {
    /// Create a configuration from a repeated `-v` count.
    ///
    /// `0` is the default level, `1` enables operation-level output and
    /// anything above enables tracing.
    pub fn from_verbose_level(level: u8) -> Self {
        let verbosity = match level {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Trace,
        };
        Self {
            verbosity,
            show_targets: level > 1,
        }
    }

    /// Configuration for `--quiet`.
    pub fn quiet() -> Self {
        Self {
            verbosity: Verbosity::Quiet,
            show_targets: false,
        }
    }

    /// Maximum level recorded for workspace targets.
    pub fn max_level(&self) -> LevelFilter {
        match self.verbosity {
            Verbosity::Quiet => LevelFilter::WARN,
            Verbosity::Normal => LevelFilter::INFO,
            Verbosity::Verbose => LevelFilter::DEBUG,
            Verbosity::Trace => LevelFilter::TRACE,
        }
    }

    /// Filter directive equivalent to this configuration.
    ///
    /// Third-party targets stay at `warn` so only the workspace's own output
    /// follows the selected verbosity.
    pub fn directive(&self) -> String {
        let level = self.max_level().to_string().to_ascii_lowercase();
        format!("warn,{TARGET_ROOT}={level}")
    }
}
