//! Installation of the global `tracing` subscriber.
//!
//! Output goes to standard error so the suite's stdout stays reserved for
//! machine-readable listings (`--list`). `RUST_LOG` takes precedence over the
//! verbosity-derived directive when it is set and parses. ANSI colours are
//! only emitted when standard error is a terminal.

use std::env;
use std::io;

use is_terminal::IsTerminal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::config::VerbosityConfig;

/// Environment variable consulted before the verbosity-derived directive.
pub const LOG_ENV: &str = "RUST_LOG";

/// Failure to install the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// A global subscriber was already installed by an earlier call.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Build the filter for `config`, letting a valid `env_directive` win.
pub fn build_filter(config: &VerbosityConfig, env_directive: Option<&str>) -> EnvFilter {
    env_directive
        .filter(|directive| !directive.trim().is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(config.directive()))
}

/// Install a stderr subscriber for `config`.
///
/// Returns [`InitError::AlreadyInstalled`] when called twice in one process,
/// which happens in tests that drive the CLI repeatedly.
pub fn try_init_tracing(config: &VerbosityConfig) -> Result<(), InitError> {
    let env_directive = env::var(LOG_ENV).ok();
    let filter = build_filter(config, env_directive.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(config.show_targets)
        .without_time()
        .try_init()
        .map_err(|error| InitError::AlreadyInstalled(error.to_string()))
}

/// Install a stderr subscriber for `config`, ignoring repeated installation.
pub fn init_tracing(config: &VerbosityConfig) {
    if let Err(error) = try_init_tracing(config) {
        debug!(target: crate::TARGET_ROOT, %error, "keeping existing subscriber");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_env_directive_falls_back_to_config() {
        let config = VerbosityConfig::quiet();
        let filter = build_filter(&config, Some("   "));
        assert_eq!(filter.to_string(), EnvFilter::new(config.directive()).to_string());
    }

    #[test]
    fn valid_env_directive_wins() {
        let config = VerbosityConfig::quiet();
        let filter = build_filter(&config, Some("longpath=trace"));
        assert_eq!(filter.to_string(), "longpath=trace");
    }

    #[test]
    fn second_install_reports_already_installed() {
        let config = VerbosityConfig::default();
        init_tracing(&config);
        assert!(matches!(
            try_init_tracing(&config),
            Err(InitError::AlreadyInstalled(_))
        ));
    }
}
